//! XML response parsing.
//!
//! The service answers with a small XML document containing one `fecha` and
//! one `hora` element. Neither has to be the root or sit at any particular
//! depth; the first occurrence in document order is used.

use roxmltree::Document;

use crate::error::FetchError;
use crate::reading::TimeReading;

/// Parses a raw response body into a [`TimeReading`].
///
/// Fails with [`FetchError::Parse`] when the markup is malformed, when either
/// element is missing, or when either element holds only whitespace. Text
/// content is trimmed but not otherwise validated.
pub fn parse_time_document(body: &str) -> Result<TimeReading, FetchError> {
    let doc = Document::parse(body)
        .map_err(|err| FetchError::Parse(format!("malformed XML: {err}")))?;

    let date = element_text(&doc, "fecha")?;
    let time = element_text(&doc, "hora")?;

    Ok(TimeReading { date, time })
}

fn element_text(doc: &Document, name: &str) -> Result<String, FetchError> {
    let node = doc
        .descendants()
        .find(|node| node.has_tag_name(name))
        .ok_or_else(|| FetchError::Parse(format!("missing <{name}> element")))?;

    let text = node.text().unwrap_or("").trim();
    if text.is_empty() {
        return Err(FetchError::Parse(format!("empty <{name}> element")));
    }

    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reference_body() {
        let body = "<rta><fecha>20240115</fecha><hora>143022</hora></rta>";
        let reading = parse_time_document(body).unwrap();
        assert_eq!(reading.date, "20240115");
        assert_eq!(reading.time, "143022");
    }

    #[test]
    fn finds_elements_at_any_depth() {
        let body = "<soap><body><ver><fecha>20240115</fecha><extra/><hora>143022</hora></ver></body></soap>";
        let reading = parse_time_document(body).unwrap();
        assert_eq!(reading.date, "20240115");
        assert_eq!(reading.time, "143022");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let body = "<rta><fecha>  20240115\n</fecha><hora>\t143022 </hora></rta>";
        let reading = parse_time_document(body).unwrap();
        assert_eq!(reading.date, "20240115");
        assert_eq!(reading.time, "143022");
    }

    #[test]
    fn missing_hora_is_parse_error() {
        let err = parse_time_document("<rta><fecha>20240115</fecha></rta>").unwrap_err();
        assert!(err.is_parse(), "expected parse error, got {err:?}");
        assert!(err.to_string().contains("hora"));
    }

    #[test]
    fn missing_fecha_is_parse_error() {
        let err = parse_time_document("<rta><hora>143022</hora></rta>").unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("fecha"));
    }

    #[test]
    fn empty_fecha_is_parse_error() {
        let err =
            parse_time_document("<rta><fecha></fecha><hora>143022</hora></rta>").unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn whitespace_only_hora_is_parse_error() {
        let err =
            parse_time_document("<rta><fecha>20240115</fecha><hora>  \n </hora></rta>").unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn malformed_markup_is_parse_error() {
        let err = parse_time_document("<rta><fecha>20240115").unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn non_xml_body_is_parse_error() {
        let err = parse_time_document("service temporarily down, try later").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn first_occurrence_wins_on_duplicates() {
        let body = "<rta><fecha>20240115</fecha><fecha>19990101</fecha>\
                    <hora>143022</hora><hora>000000</hora></rta>";
        let reading = parse_time_document(body).unwrap();
        assert_eq!(reading.date, "20240115");
        assert_eq!(reading.time, "143022");
    }
}
