use crate::config::{
    ARTEFACT_REFS, CONNECTIONS, DATE_OF_CREATION, EVENT_REFS, INDIVIDUAL_REFS, NAME,
};
use crate::models::{Archive, Artefact, ConnectionCounts, Individual};
use anyhow::{bail, Context, Result};
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::debug;

const ARTEFACT: &str = "Artefact";
const INDIVIDUAL: &str = "Individual";
const ARTEFACT_REF: &str = "ArtefactRef";
const EVENT_REF: &str = "EventRef";
const INDIVIDUAL_REF: &str = "IndividualRef";

#[derive(Debug)]
enum Node {
    Element(Element),
    Text(String),
}

/// In-memory XML element with its children in document order.
#[derive(Debug)]
struct Element {
    name: String,
    children: Vec<Node>,
}

impl Element {
    fn new(start: &BytesStart<'_>, decoder: Decoder) -> Result<Self> {
        let qname = start.name();
        let name = decoder
            .decode(qname.as_ref())
            .context("Undecodable element name")?;
        Ok(Self {
            name: name.into_owned(),
            children: Vec::new(),
        })
    }

    fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// All descendants named `name` in document order, excluding `self`.
    fn descendants<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            if child.name == name {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }

    fn first_descendant(&self, name: &str) -> Option<&Element> {
        for child in self.child_elements() {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.first_descendant(name) {
                return Some(found);
            }
        }
        None
    }

    /// Descendants named `name`, including `self` when it matches.
    fn find_all<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        if self.name == name {
            found.push(self);
        }
        self.collect_descendants(name, &mut found);
        found
    }

    fn text_content(&self) -> String {
        let mut text = String::new();
        self.push_text(&mut text);
        text
    }

    fn push_text(&self, text: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => text.push_str(t),
                Node::Element(el) => el.push_text(text),
            }
        }
    }

    /// Text of the first descendant named `name`, empty if there is none.
    fn descendant_text(&self, name: &str) -> String {
        self.first_descendant(name)
            .map(Element::text_content)
            .unwrap_or_default()
    }
}

/// Parses an archive document laid out as nested `Artefact` and `Individual` elements.
///
/// Text is decoded using the encoding named in the XML declaration (UTF-8 when
/// there is none).
pub fn parse_archive(document: &[u8]) -> Result<Archive> {
    let root = parse_document(document)?;

    let artefacts: Vec<Artefact> = root
        .find_all(ARTEFACT)
        .into_iter()
        .map(|el| Artefact::new(el.descendant_text(DATE_OF_CREATION)))
        .collect();

    let individuals: Vec<Individual> = root
        .find_all(INDIVIDUAL)
        .into_iter()
        .map(|el| {
            let connections = el.first_descendant(CONNECTIONS);
            let counts = ConnectionCounts {
                artifact: count_refs(connections, ARTEFACT_REFS, ARTEFACT_REF),
                event: count_refs(connections, EVENT_REFS, EVENT_REF),
                individual: count_refs(connections, INDIVIDUAL_REFS, INDIVIDUAL_REF),
            };
            Individual::new(el.descendant_text(NAME), counts)
        })
        .collect();

    debug!(
        root = %root.name,
        artefacts = artefacts.len(),
        individuals = individuals.len(),
        "Parsed XML archive"
    );

    Ok(Archive::new(artefacts, individuals))
}

fn count_refs(connections: Option<&Element>, container: &str, entry: &str) -> u64 {
    connections
        .and_then(|c| c.first_descendant(container))
        .map(|c| c.descendants(entry).len() as u64)
        .unwrap_or(0)
}

fn parse_document(document: &[u8]) -> Result<Element> {
    let mut reader = Reader::from_reader(document);
    reader.trim_text(true);

    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .with_context(|| format!("Malformed XML near byte {}", reader.buffer_position()))?;

        match event {
            Event::Start(e) => open.push(Element::new(&e, reader.decoder())?),
            Event::Empty(e) => {
                let el = Element::new(&e, reader.decoder())?;
                attach(&mut open, &mut root, el)?;
            }
            Event::End(_) => {
                let el = open.pop().context("Closing tag without matching start")?;
                attach(&mut open, &mut root, el)?;
            }
            Event::Text(e) => {
                let text = e.unescape().context("Invalid escape in XML text")?;
                if let Some(parent) = open.last_mut() {
                    parent.children.push(Node::Text(text.into_owned()));
                }
            }
            Event::CData(e) => {
                let data = reader
                    .decoder()
                    .decode(&e)
                    .context("Undecodable CDATA section")?;
                if let Some(parent) = open.last_mut() {
                    parent.children.push(Node::Text(data.into_owned()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(el) = open.last() {
        bail!("Unclosed element <{}>", el.name);
    }
    root.context("Document has no root element")
}

fn attach(open: &mut [Element], root: &mut Option<Element>, el: Element) -> Result<()> {
    match open.last_mut() {
        Some(parent) => parent.children.push(Node::Element(el)),
        None => {
            if root.is_some() {
                bail!("Multiple root elements (second is <{}>)", el.name);
            }
            *root = Some(el);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<HistoricalArchive>
    <Artefacts>
        <Artefact id="a1">
            <Name>Steam Engine Model</Name>
            <DateOfCreation>1850 CE</DateOfCreation>
        </Artefact>
        <Artefact id="a2">
            <DateOfCreation><![CDATA[300 BCE]]></DateOfCreation>
        </Artefact>
        <Artefact id="a3"/>
    </Artefacts>
    <HistoricalIndividuals>
        <Individual id="i1">
            <Name>Ada</Name>
            <Connections>
                <ArtefactRefs>
                    <ArtefactRef>a1</ArtefactRef>
                    <ArtefactRef>a2</ArtefactRef>
                    <ArtefactRef>a3</ArtefactRef>
                </ArtefactRefs>
                <EventRefs/>
            </Connections>
        </Individual>
        <Individual id="i2">
            <Name>Brunel &amp; Sons</Name>
        </Individual>
    </HistoricalIndividuals>
</HistoricalArchive>"#
    }

    #[test]
    fn reads_artefact_dates_in_order() {
        let archive = parse_archive(sample().as_bytes()).unwrap();
        let dates: Vec<&str> = archive
            .artefacts()
            .iter()
            .map(|a| a.date_of_creation())
            .collect();
        assert_eq!(dates, vec!["1850 CE", "300 BCE", ""]);
    }

    #[test]
    fn counts_connection_refs() {
        let archive = parse_archive(sample().as_bytes()).unwrap();
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
    fn missing_connections_count_as_zero() {
        let archive = parse_archive(sample().as_bytes()).unwrap();
        let brunel = &archive.individuals()[1];
        assert_eq!(brunel.name(), "Brunel & Sons");
        assert_eq!(brunel.connection_counts(), ConnectionCounts::default());
    }

    #[test]
    fn root_element_can_itself_match() {
        let archive = parse_archive(b"<Artefact><DateOfCreation>2001 CE</DateOfCreation></Artefact>")
            .unwrap();
        assert_eq!(archive.artefacts().len(), 1);
        assert_eq!(archive.artefacts()[0].date_of_creation(), "2001 CE");
    }

    #[test]
    fn text_content_spans_nested_elements() {
        let archive = parse_archive(
            b"<Archive><Artefact><DateOfCreation>18<b>50</b>CE</DateOfCreation></Artefact></Archive>",
        )
        .unwrap();
        assert_eq!(archive.artefacts()[0].date_of_creation(), "1850CE");
    }

    #[test]
    fn decodes_declared_latin1_encoding() {
        let archive = parse_archive(
            b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\
              <HistoricalArchive><Individual><Name>Jos\xe9 Mart\xed</Name></Individual>\
              <Artefact><DateOfCreation>1850 CE</DateOfCreation></Artefact></HistoricalArchive>",
        )
        .unwrap();
        assert_eq!(archive.individuals()[0].name(), "Jos\u{e9} Mart\u{ed}");
        assert_eq!(archive.artefacts()[0].date_of_creation(), "1850 CE");
    }

    #[test]
    fn rejects_mismatched_tags() {
        assert!(parse_archive(b"<Archive><Artefact></Archive>").is_err());
    }

    #[test]
    fn rejects_unclosed_elements() {
        assert!(parse_archive(b"<Archive><Artefact>").is_err());
    }

    #[test]
    fn rejects_empty_document() {
        assert!(parse_archive(b"").is_err());
        assert!(parse_archive(b"   ").is_err());
    }
}
