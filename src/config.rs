/// Input read when no path is given on the command line
pub const DEFAULT_INPUT: &str = "example.xml";

/// Substring that marks a date as Before Common Era
pub const BCE_MARKER: &str = "BCE";

/// Number of years in a century bucket
pub const YEARS_PER_CENTURY: u32 = 100;

pub const Q1_HEADING: &str = "Question 1: What is the distribution of artifacts by century?";

pub const Q2_HEADING: &str = "Question 2: Which individuals have the most connections by type?";

/// Field names shared by the XML and JSON layouts
pub const DATE_OF_CREATION: &str = "DateOfCreation";
pub const NAME: &str = "Name";
pub const CONNECTIONS: &str = "Connections";
pub const ARTEFACT_REFS: &str = "ArtefactRefs";
pub const EVENT_REFS: &str = "EventRefs";
pub const INDIVIDUAL_REFS: &str = "IndividualRefs";
