//! Snippet tree as persisted in `snippets.json`.

use serde::{Deserialize, Deserializer, Serialize};

/// Reads `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A `null` snippet entry reads as an empty snippet.
fn snippet_list<'de, D>(deserializer: D) -> Result<Vec<Snippet>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<Option<Snippet>>> = Option::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// `null` group entries carry nothing to show and are skipped.
fn group_list<'de, D>(deserializer: D) -> Result<Vec<SnippetGroup>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<Option<SnippetGroup>>> = Option::deserialize(deserializer)?;
    Ok(entries.unwrap_or_default().into_iter().flatten().collect())
}

/// A title/content pair copied to the clipboard on activation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(default, alias = "Title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, alias = "Content", deserialize_with = "null_as_default")]
    pub content: String,
}

impl Snippet {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: content.into(),
        }
    }

    /// A snippet without an explicit title; the panel derives one from the content.
    pub fn untitled(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: content.into(),
        }
    }

    /// The trimmed explicit title, if it has any visible characters.
    pub fn explicit_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }
}

/// Named, ordered collection of snippets rendered as one container.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetGroup {
    #[serde(default, alias = "Name", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, alias = "Snippets", deserialize_with = "snippet_list")]
    pub snippets: Vec<Snippet>,
}

impl SnippetGroup {
    pub fn new(name: impl Into<String>, snippets: Vec<Snippet>) -> Self {
        Self {
            name: name.into(),
            snippets,
        }
    }
}

/// Root aggregate, replaced wholesale on every reload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootConfig {
    #[serde(default, alias = "Groups", deserialize_with = "group_list")]
    pub groups: Vec<SnippetGroup>,
}

impl RootConfig {
    pub fn new(groups: Vec<SnippetGroup>) -> Self {
        Self { groups }
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn snippet_count(&self) -> usize {
        self.groups.iter().map(|g| g.snippets.len()).sum()
    }

    /// Group names in display order; equality of this sequence decides
    /// between a full and an incremental layout rebuild.
    pub fn group_names(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.name.clone()).collect()
    }

    pub fn snippet(&self, address: SnippetAddress) -> Option<&Snippet> {
        self.groups
            .get(address.group)?
            .snippets
            .get(address.snippet)
    }
}

/// Positional identity of a snippet: its group index and its index within the group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SnippetAddress {
    pub group: usize,
    pub snippet: usize,
}

impl SnippetAddress {
    pub fn new(group: usize, snippet: usize) -> Self {
        Self { group, snippet }
    }
}
