/// Reference counts held by one individual, by target type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionCounts {
    pub artifact: u64,
    pub event: u64,
    pub individual: u64,
}

impl ConnectionCounts {
    pub fn total(&self) -> u64 {
        self.artifact + self.event + self.individual
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artefact {
    date_of_creation: String,
}

impl Artefact {
    pub fn new(date_of_creation: impl Into<String>) -> Self {
        Self {
            date_of_creation: date_of_creation.into(),
        }
    }

    pub fn date_of_creation(&self) -> &str {
        &self.date_of_creation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    name: String,
    connections: ConnectionCounts,
}

impl Individual {
    pub fn new(name: impl Into<String>, connections: ConnectionCounts) -> Self {
        Self {
            name: name.into(),
            connections,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn connection_counts(&self) -> ConnectionCounts {
        self.connections
    }
}

/// A fully loaded archive document, independent of its source format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive {
    artefacts: Vec<Artefact>,
    individuals: Vec<Individual>,
}

impl Archive {
    pub fn new(artefacts: Vec<Artefact>, individuals: Vec<Individual>) -> Self {
        Self {
            artefacts,
            individuals,
        }
    }

    /// Artefacts in document order
    pub fn artefacts(&self) -> &[Artefact] {
        &self.artefacts
    }

    /// Individuals in document order
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn is_empty(&self) -> bool {
        self.artefacts.is_empty() && self.individuals.is_empty()
    }
}
