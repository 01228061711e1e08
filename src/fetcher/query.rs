//! Query-term composition for the registry search endpoint.

/// Build the `query.term` parameter.
///
/// A single keyword is used verbatim; multiple keywords are individually
/// quoted and OR-combined. Phases, when present, are AND-combined as an
/// `AREA[Phase]` clause joining the phases with OR.
pub fn build_query_term(keywords: &[String], phases: &[String]) -> String {
    let keyword_part = if keywords.len() == 1 {
        keywords[0].clone()
    } else {
        let quoted: Vec<String> = keywords.iter().map(|k| format!("\"{}\"", k)).collect();
        format!("({})", quoted.join(" OR "))
    };

    if phases.is_empty() {
        keyword_part
    } else {
        format!("{} AND AREA[Phase]({})", keyword_part, phases.join(" OR "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_keyword_is_verbatim() {
        assert_eq!(build_query_term(&strings(&["diabetes"]), &[]), "diabetes");
    }

    #[test]
    fn test_multiple_keywords_quoted_and_or_combined() {
        assert_eq!(
            build_query_term(&strings(&["diabetes", "CAR-T therapy"]), &[]),
            "(\"diabetes\" OR \"CAR-T therapy\")"
        );
    }

    #[test]
    fn test_phases_append_area_clause() {
        assert_eq!(
            build_query_term(&strings(&["diabetes"]), &strings(&["PHASE2", "PHASE3"])),
            "diabetes AND AREA[Phase](PHASE2 OR PHASE3)"
        );
    }

    #[test]
    fn test_multiple_keywords_with_phases() {
        assert_eq!(
            build_query_term(&strings(&["a", "b"]), &strings(&["PHASE1"])),
            "(\"a\" OR \"b\") AND AREA[Phase](PHASE1)"
        );
    }
}
