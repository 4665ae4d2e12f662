//! HCD taxonomy
//!
//! Fixed two-level scheme: five spaces, each owning four subspaces. The
//! declaration order of [`Subspace`] is the display order used by every
//! table, and the derived `Ord` follows it.
//!
//! Human annotators pick from a slightly different per-space list, see
//! [`Space::label_choices`]; submissions are validated against that list.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::errors::LabelError;

/// Level 1 of the taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Space {
    Understand,
    Synthesize,
    Ideate,
    Prototype,
    Implement,
}

impl Space {
    pub const ALL: [Space; 5] = [
        Space::Understand,
        Space::Synthesize,
        Space::Ideate,
        Space::Prototype,
        Space::Implement,
    ];

    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Understand => "UNDERSTAND",
            Self::Synthesize => "SYNTHESIZE",
            Self::Ideate => "IDEATE",
            Self::Prototype => "PROTOTYPE",
            Self::Implement => "IMPLEMENT",
        }
    }

    /// Subspaces owned by this space, in display order
    pub fn subspaces(&self) -> &'static [Subspace] {
        match self {
            Self::Understand => &Subspace::ALL[0..4],
            Self::Synthesize => &Subspace::ALL[4..8],
            Self::Ideate => &Subspace::ALL[8..12],
            Self::Prototype => &Subspace::ALL[12..16],
            Self::Implement => &Subspace::ALL[16..20],
        }
    }

    /// Case-insensitive lookup of a space name
    pub fn resolve(tag: &str) -> Option<Space> {
        Self::ALL
            .into_iter()
            .find(|space| space.as_str().eq_ignore_ascii_case(tag))
    }

    /// Subspace names a human annotator may pick under this space, spelled
    /// as the labeling form submits them.
    ///
    /// This vocabulary is not the results taxonomy: PROTOTYPE offers
    /// `(Re)Create`, and IMPLEMENT offers `Develop` but not `Support`.
    pub fn label_choices(&self) -> &'static [&'static str] {
        match self {
            Self::Understand => &["Explore", "Observe", "Empathize", "Reflect"],
            Self::Synthesize => &["Debrief", "Organize", "Define", "Interpret"],
            Self::Ideate => &["Brainstorm", "Propose", "Plan", "Narrow Concepts"],
            Self::Prototype => &["(Re)Create", "Engage", "Evaluate", "Iterate"],
            Self::Implement => &["Develop", "Evolve", "Sustain", "Execute"],
        }
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Space {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s).ok_or_else(|| LabelError::UnknownSpace { name: s.to_string() })
    }
}

/// Level 2 of the taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subspace {
    Explore,
    Observe,
    Empathize,
    Reflect,
    Debrief,
    Organize,
    Interpret,
    Define,
    Brainstorm,
    Propose,
    Plan,
    NarrowConcepts,
    Create,
    Engage,
    Evaluate,
    Iterate,
    Support,
    Sustain,
    Evolve,
    Execute,
}

/// Alternate spellings accepted on input. The labeling form shows
/// `(Re)Create` for the subspace the result tables call `Create`.
const SUBSPACE_ALIASES: &[(&str, Subspace)] = &[("(Re)Create", Subspace::Create)];

/// Lower-cased name -> subspace, built once per process.
static SUBSPACE_INDEX: LazyLock<HashMap<String, Subspace>> = LazyLock::new(|| {
    let mut index: HashMap<String, Subspace> = Subspace::ALL
        .iter()
        .map(|subspace| (subspace.as_str().to_lowercase(), *subspace))
        .collect();
    for (alias, subspace) in SUBSPACE_ALIASES {
        index.insert(alias.to_lowercase(), *subspace);
    }
    index
});

impl Subspace {
    pub const ALL: [Subspace; 20] = [
        Subspace::Explore,
        Subspace::Observe,
        Subspace::Empathize,
        Subspace::Reflect,
        Subspace::Debrief,
        Subspace::Organize,
        Subspace::Interpret,
        Subspace::Define,
        Subspace::Brainstorm,
        Subspace::Propose,
        Subspace::Plan,
        Subspace::NarrowConcepts,
        Subspace::Create,
        Subspace::Engage,
        Subspace::Evaluate,
        Subspace::Iterate,
        Subspace::Support,
        Subspace::Sustain,
        Subspace::Evolve,
        Subspace::Execute,
    ];

    /// Canonical display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Explore => "Explore",
            Self::Observe => "Observe",
            Self::Empathize => "Empathize",
            Self::Reflect => "Reflect",
            Self::Debrief => "Debrief",
            Self::Organize => "Organize",
            Self::Interpret => "Interpret",
            Self::Define => "Define",
            Self::Brainstorm => "Brainstorm",
            Self::Propose => "Propose",
            Self::Plan => "Plan",
            Self::NarrowConcepts => "Narrow Concepts",
            Self::Create => "Create",
            Self::Engage => "Engage",
            Self::Evaluate => "Evaluate",
            Self::Iterate => "Iterate",
            Self::Support => "Support",
            Self::Sustain => "Sustain",
            Self::Evolve => "Evolve",
            Self::Execute => "Execute",
        }
    }

    /// The space that owns this subspace
    pub fn space(&self) -> Space {
        match self {
            Self::Explore | Self::Observe | Self::Empathize | Self::Reflect => Space::Understand,
            Self::Debrief | Self::Organize | Self::Interpret | Self::Define => Space::Synthesize,
            Self::Brainstorm | Self::Propose | Self::Plan | Self::NarrowConcepts => Space::Ideate,
            Self::Create | Self::Engage | Self::Evaluate | Self::Iterate => Space::Prototype,
            Self::Support | Self::Sustain | Self::Evolve | Self::Execute => Space::Implement,
        }
    }

    /// Resolve a free-form tag to its canonical subspace.
    ///
    /// Matching is exact apart from case; `" Explore"` does not resolve.
    pub fn resolve(tag: &str) -> Option<Subspace> {
        SUBSPACE_INDEX.get(&tag.to_lowercase()).copied()
    }
}

impl fmt::Display for Subspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subspace {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s).ok_or_else(|| LabelError::UnknownSubspace { name: s.to_string() })
    }
}

impl Serialize for Subspace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Subspace {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for Space {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Space {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Typed spellings accepted for a labeling-form choice
const LABEL_ALIASES: &[(&str, &str)] = &[("Create", "(Re)Create")];

/// A human label, spelled the way the labeling form submits it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelChoice {
    pub space: Space,
    pub subspace: &'static str,
}

/// Check a human label before it is submitted.
///
/// The subspace must be one of the space's [`Space::label_choices`],
/// compared case-insensitively. Annotations from the form and from the CLI
/// then carry identical strings, which conflict detection relies on.
pub fn validate_label(space: &str, subspace: &str) -> crate::errors::Result<LabelChoice> {
    let space: Space = space.trim().parse()?;
    let typed = subspace.trim();
    let wanted = LABEL_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(typed))
        .map_or(typed, |(_, choice)| *choice);
    let is_wanted = |choice: &&&'static str| choice.eq_ignore_ascii_case(wanted);

    if let Some(choice) = space.label_choices().iter().find(is_wanted) {
        return Ok(LabelChoice {
            space,
            subspace: *choice,
        });
    }
    match Space::ALL
        .iter()
        .find_map(|other| other.label_choices().iter().find(is_wanted))
    {
        Some(choice) => Err(LabelError::SubspaceOutsideSpace {
            space: space.to_string(),
            subspace: (*choice).to_string(),
        }),
        None => Err(LabelError::UnknownSubspace {
            name: typed.to_string(),
        }),
    }
}
