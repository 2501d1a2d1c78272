use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Catalog bundled into the binary, used when no `catalog` path is configured.
pub const BUNDLED_CATALOG: &str = include_str!("../assets/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is empty")]
    Empty,
    #[error("duplicate endpoint id `{0}`")]
    DuplicateId(String),
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Methods that document a request body header.
    pub fn has_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Github,
    Resume,
    External,
    Linkedin,
    Email,
    Phone,
}

impl LinkKind {
    pub fn glyph(&self) -> &'static str {
        match self {
            LinkKind::Github => "gh",
            LinkKind::Resume => "🗎",
            LinkKind::External => "↗",
            LinkKind::Linkedin => "in",
            LinkKind::Email => "✉",
            LinkKind::Phone => "☎",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: LinkKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub label: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intro {
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDescriptor {
    pub id: String,
    pub path: String,
    pub method: Method,
    pub label: String,
    pub description: String,
    pub group: String,
    pub response: Value,
    #[serde(default)]
    pub request_body: Option<Value>,
    #[serde(default)]
    pub intro: Option<Intro>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl EndpointDescriptor {
    pub fn is_project(&self) -> bool {
        self.path.starts_with("/projects/")
    }

    /// Link shown next to the path header of project entries.
    pub fn project_link(&self) -> Option<&Link> {
        if !self.is_project() {
            return None;
        }
        self.links.iter().find(|l| l.kind == LinkKind::Github)
    }

    /// The link `o` opens: the project link for projects, the first link otherwise.
    pub fn primary_link(&self) -> Option<&Link> {
        self.project_link().or_else(|| self.links.first())
    }
}

/// Immutable, validated, ordered endpoint list.
#[derive(Clone, Debug)]
pub struct Catalog {
    endpoints: Vec<EndpointDescriptor>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(endpoints: Vec<EndpointDescriptor>) -> Result<Self, CatalogError> {
        if endpoints.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_id = HashMap::with_capacity(endpoints.len());
        for (idx, endpoint) in endpoints.iter().enumerate() {
            if by_id.insert(endpoint.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId(endpoint.id.clone()));
            }
        }

        Ok(Catalog { endpoints, by_id })
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let endpoints: Vec<EndpointDescriptor> = serde_json::from_str(text)?;
        Self::new(endpoints)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn endpoints(&self) -> &[EndpointDescriptor] {
        &self.endpoints
    }

    pub fn iter(&self) -> impl Iterator<Item = &EndpointDescriptor> {
        self.endpoints.iter()
    }

    pub fn first(&self) -> &EndpointDescriptor {
        &self.endpoints[0]
    }

    pub fn at(&self, index: usize) -> Option<&EndpointDescriptor> {
        self.endpoints.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&EndpointDescriptor> {
        self.index_of(id).map(|idx| &self.endpoints[idx])
    }

    /// Resolves either an id or a path such as `/skills`.
    pub fn resolve(&self, key: &str) -> Option<&EndpointDescriptor> {
        self.get(key)
            .or_else(|| self.endpoints.iter().find(|e| e.path == key))
    }

    /// Groups in first-seen order, each holding catalog indices in catalog order.
    pub fn groups(&self) -> Vec<(&str, Vec<usize>)> {
        let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
        for (idx, endpoint) in self.endpoints.iter().enumerate() {
            match groups.iter_mut().find(|(name, _)| *name == endpoint.group) {
                Some((_, members)) => members.push(idx),
                None => groups.push((endpoint.group.as_str(), vec![idx])),
            }
        }
        groups
    }
}
