//! The ordered stage catalog and its file format.
//!
//! The catalog file is either plain JSON (`[...]`) or the script form
//! `const STAGES = [...];` that a page can load with a `<script>` tag.
//! Saving always writes the script form.

use std::fmt;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::descriptor::StageDescriptor;

const SCRIPT_PREFIX: &str = "const STAGES =";

/// Every stage of the activity, in play order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    stages: Vec<StageDescriptor>,
}

impl Catalog {
    pub fn new(stages: Vec<StageDescriptor>) -> Result<Self, CatalogError> {
        if stages.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { stages })
    }

    /// Parse a catalog from either JSON or the script form.
    pub fn from_source(source: &str) -> Result<Self, CatalogError> {
        let stages: Vec<StageDescriptor> = serde_json::from_str(strip_script(source))?;
        Self::new(stages)
    }

    pub fn get(&self, index: usize) -> Option<&StageDescriptor> {
        self.stages.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut StageDescriptor> {
        self.stages.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StageDescriptor> {
        self.stages.iter()
    }

    /// Compact JSON array, the body of a save request.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string(&self.stages)?)
    }

    /// The catalog as a loadable script file.
    pub fn to_script(&self) -> Result<String, CatalogError> {
        write_script(&self.stages)
    }
}

/// Render any JSON value as `const STAGES = <value>;` pretty printed with four spaces.
pub fn write_script<T: Serialize + ?Sized>(value: &T) -> Result<String, CatalogError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    let body = String::from_utf8_lossy(&buf);
    Ok(format!("{SCRIPT_PREFIX} {body};"))
}

fn strip_script(source: &str) -> &str {
    let trimmed = source.trim().trim_start_matches('\u{feff}');
    let Some(rest) = trimmed.strip_prefix(SCRIPT_PREFIX) else {
        return trimmed;
    };
    let rest = rest.trim();
    rest.strip_suffix(';').unwrap_or(rest).trim_end()
}

#[derive(Debug)]
pub enum CatalogError {
    Parse(serde_json::Error),
    Empty,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Parse(e) => write!(f, "invalid stage catalog: {e}"),
            CatalogError::Empty => write!(f, "stage catalog has no stages"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Parse(e) => Some(e),
            CatalogError::Empty => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"const STAGES = [
    {
        "id": 1,
        "type": "normal",
        "inputType": "pad",
        "title": "Level 1",
        "targets": [
            {
                "x": 440,
                "y": 340,
                "width": 220,
                "height": 120
            }
        ]
    }
];
"#;

    #[test]
    fn loads_script_form() {
        let catalog = Catalog::from_source(SCRIPT).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().title, "Level 1");
    }

    #[test]
    fn loads_plain_json() {
        let catalog = Catalog::from_source(r#"[{"type": "normal", "title": "a"}, {"type": "normal", "title": "b"}]"#).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(Catalog::from_source("[]"), Err(CatalogError::Empty)));
        assert!(matches!(Catalog::from_source("const STAGES = {"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn script_round_trips_byte_for_byte() {
        let catalog = Catalog::from_source(SCRIPT).unwrap();
        assert_eq!(catalog.to_script().unwrap(), SCRIPT.trim_end());
    }

    #[test]
    fn edits_are_written_back() {
        let mut catalog = Catalog::from_source(SCRIPT).unwrap();
        catalog.get_mut(0).unwrap().targets.as_mut().unwrap()[0].x = 500.0;
        let reloaded = Catalog::from_source(&catalog.to_json().unwrap()).unwrap();
        assert_eq!(reloaded.get(0).unwrap().targets.as_ref().unwrap()[0].x, 500.0);
    }
}
