use crate::config::{
    ARTEFACT_REFS, CONNECTIONS, DATE_OF_CREATION, EVENT_REFS, INDIVIDUAL_REFS, NAME,
};
use crate::models::{Archive, Artefact, ConnectionCounts, Individual};
use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

const ROOT: &str = "HistoricalArchive";
const ARTEFACTS: &str = "Artefacts";
const INDIVIDUALS: &str = "HistoricalIndividuals";

/// Parses a `{"HistoricalArchive": {...}}` document.
///
/// Collections that are missing or not arrays are read as empty.
pub fn parse_archive(text: &str) -> Result<Archive> {
    let doc: Value = serde_json::from_str(text).context("Malformed JSON document")?;
    let root = doc.get(ROOT);

    let artefacts: Vec<Artefact> = entries(root, ARTEFACTS)
        .iter()
        .map(|a| Artefact::new(scalar_text(a.get(DATE_OF_CREATION))))
        .collect();

    let individuals: Vec<Individual> = entries(root, INDIVIDUALS)
        .iter()
        .map(|i| {
            let connections = i.get(CONNECTIONS);
            let counts = ConnectionCounts {
                artifact: array_len(connections, ARTEFACT_REFS),
                event: array_len(connections, EVENT_REFS),
                individual: array_len(connections, INDIVIDUAL_REFS),
            };
            Individual::new(scalar_text(i.get(NAME)), counts)
        })
        .collect();

    debug!(
        artefacts = artefacts.len(),
        individuals = individuals.len(),
        "Parsed JSON archive"
    );

    Ok(Archive::new(artefacts, individuals))
}

fn entries<'a>(parent: Option<&'a Value>, key: &str) -> &'a [Value] {
    parent
        .and_then(|p| p.get(key))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn array_len(parent: Option<&Value>, key: &str) -> u64 {
    entries(parent, key).len() as u64
}

/// Strings verbatim, numbers and booleans as written, anything else
/// (including `null`) empty.
fn scalar_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> &'static str {
        r#"{
            "HistoricalArchive": {
                "Artefacts": [
                    { "ID": "a1", "Name": "Steam Engine Model", "DateOfCreation": "1850 CE" },
                    { "ID": "a2", "DateOfCreation": "300 BCE" },
                    { "ID": "a3" }
                ],
                "HistoricalIndividuals": [
                    {
                        "Name": "Ada",
                        "Connections": {
                            "ArtefactRefs": ["a1", "a2", "a3"],
                            "EventRefs": []
                        }
                    },
                    { "Name": "Brunel", "Connections": { "EventRefs": "e1", "IndividualRefs": [{"ID": "i1"}] } },
                    { "Connections": null }
                ]
            }
        }"#
    }

    #[test]
    fn reads_artefact_dates_in_order() {
        let archive = parse_archive(sample()).unwrap();
        let dates: Vec<&str> = archive
            .artefacts()
            .iter()
            .map(|a| a.date_of_creation())
            .collect();
        assert_eq!(dates, vec!["1850 CE", "300 BCE", ""]);
    }

    #[test]
    fn counts_array_refs() {
        let archive = parse_archive(sample()).unwrap();
        let ada = &archive.individuals()[0];
        assert_eq!(ada.name(), "Ada");
        assert_eq!(
            ada.connection_counts(),
            ConnectionCounts {
                artifact: 3,
                event: 0,
                individual: 0,
            }
        );
    }

    #[test]
    fn non_array_refs_count_as_zero() {
        let archive = parse_archive(sample()).unwrap();
        let brunel = &archive.individuals()[1];
        assert_eq!(
            brunel.connection_counts(),
            ConnectionCounts {
                artifact: 0,
                event: 0,
                individual: 1,
            }
        );
    }

    #[test]
    fn missing_name_reads_as_empty() {
        let archive = parse_archive(sample()).unwrap();
        let anonymous = &archive.individuals()[2];
        assert_eq!(anonymous.name(), "");
        assert_eq!(anonymous.connection_counts().total(), 0);
    }

    #[test]
    fn numeric_dates_keep_their_text() {
        let archive =
            parse_archive(r#"{"HistoricalArchive": {"Artefacts": [{"DateOfCreation": 1850}]}}"#)
                .unwrap();
        assert_eq!(archive.artefacts()[0].date_of_creation(), "1850");
    }

    #[test]
    fn null_scalars_read_as_empty() {
        let archive = parse_archive(
            r#"{"HistoricalArchive": {
                "Artefacts": [{"DateOfCreation": null}],
                "HistoricalIndividuals": [{"Name": null}]
            }}"#,
        )
        .unwrap();
        assert_eq!(archive.artefacts()[0].date_of_creation(), "");
        assert_eq!(archive.individuals()[0].name(), "");
    }

    #[test]
    fn missing_collections_are_empty() {
        assert!(parse_archive("{}").unwrap().is_empty());
        assert!(parse_archive(r#"{"HistoricalArchive": {"Artefacts": {}}}"#)
            .unwrap()
            .is_empty());
        assert!(parse_archive("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_archive("{\"HistoricalArchive\": ").is_err());
        assert!(parse_archive("").is_err());
    }
}
