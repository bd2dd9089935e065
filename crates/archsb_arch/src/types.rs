//! Switchblock data model.
//!
//! A [`SwitchblockSpec`] is built once per `<switchblock>` element by the
//! builder, checked once by the validator and read-only afterwards. Formulas
//! are kept as raw strings and evaluated on demand through `archsb_formula`.

use archsb_source::Span;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One side of a switchblock.
///
/// The declaration order (top, right, bottom, left) is the iteration order
/// used by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Top side.
    Top,
    /// Right side.
    Right,
    /// Bottom side.
    Bottom,
    /// Left side.
    Left,
}

impl Side {
    /// All sides in iteration order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Decodes one letter of a side-pair code (`l`, `t`, `r`, `b`).
    pub fn from_letter(letter: char) -> Option<Side> {
        match letter {
            't' => Some(Side::Top),
            'r' => Some(Side::Right),
            'b' => Some(Side::Bottom),
            'l' => Some(Side::Left),
            _ => None,
        }
    }

    /// The letter used for this side in side-pair codes.
    pub fn letter(self) -> char {
        match self {
            Side::Top => 't',
            Side::Right => 'r',
            Side::Bottom => 'b',
            Side::Left => 'l',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        })
    }
}

/// An ordered pair of distinct sides, written as a two-letter code such as
/// `lt` (left to top).
///
/// `(Left, Top)` and `(Top, Left)` are different pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SidePair {
    from: Side,
    to: Side,
}

impl SidePair {
    /// Creates a pair, or `None` if both sides are the same.
    pub fn new(from: Side, to: Side) -> Option<Self> {
        (from != to).then_some(Self { from, to })
    }

    /// Decodes one of the twelve two-letter codes (`lt`, `lr`, `lb`, `tl`, ...).
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let from = Side::from_letter(chars.next()?)?;
        let to = Side::from_letter(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Self::new(from, to)
    }

    /// The two-letter code of this pair.
    pub fn code(self) -> String {
        [self.from.letter(), self.to.letter()].iter().collect()
    }

    /// Source side.
    pub fn from(self) -> Side {
        self.from
    }

    /// Destination side.
    pub fn to(self) -> Side {
        self.to
    }

    /// The same two sides in the opposite direction.
    pub fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

impl fmt::Display for SidePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for SidePair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code())
    }
}

impl<'de> Deserialize<'de> for SidePair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        SidePair::from_code(&code)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid side pair `{code}`")))
    }
}

/// How many connections a wireconn instantiates relative to the sizes of its
/// from-set and to-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumConnsType {
    /// One connection per from-wire.
    From,
    /// One connection per to-wire.
    To,
    /// The smaller of the two.
    Min,
    /// The larger of the two.
    Max,
}

impl FromStr for NumConnsType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "from" => Ok(NumConnsType::From),
            "to" => Ok(NumConnsType::To),
            "min" => Ok(NumConnsType::Min),
            "max" => Ok(NumConnsType::Max),
            _ => Err(()),
        }
    }
}

/// Wire directionality of a switchblock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Directionality {
    /// Every wire has one driver at its start point (`uni`).
    Unidirectional,
    /// Wires may be driven from either end (`bi`).
    Bidirectional,
}

impl FromStr for Directionality {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uni" => Ok(Directionality::Unidirectional),
            "bi" => Ok(Directionality::Bidirectional),
            _ => Err(()),
        }
    }
}

/// A segment type and the switchpoints along it that a wireconn uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSwitchpoints {
    /// Name of a segment in the `<segmentlist>`.
    pub segment_name: String,
    /// Switchpoints, in document order. Never empty once built.
    pub switchpoints: Vec<i32>,
    /// The `<from>`/`<to>` element, or the `<wireconn>` for inline style.
    #[serde(skip)]
    pub span: Span,
}

impl WireSwitchpoints {
    /// Creates an entry with no switchpoints yet.
    pub fn new(segment_name: impl Into<String>, span: Span) -> Self {
        Self {
            segment_name: segment_name.into(),
            switchpoints: Vec::new(),
            span,
        }
    }
}

/// One `<wireconn>`: which segment/switchpoint combinations connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireConn {
    /// Connection count policy.
    pub num_conns_type: NumConnsType,
    /// Source wires. Never empty once built.
    pub from_set: Vec<WireSwitchpoints>,
    /// Destination wires. Never empty once built.
    pub to_set: Vec<WireSwitchpoints>,
    /// The `<wireconn>` element.
    #[serde(skip)]
    pub span: Span,
}

/// One `<func>` formula together with the element it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermutationFunc {
    /// Raw formula text, not evaluated at build time.
    pub formula: String,
    /// The `<func>` element.
    #[serde(skip)]
    pub span: Span,
}

/// Permutation formulas per side pair, in document order.
///
/// A pair may collect several formulas; each `<func>` is appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermutationMap(BTreeMap<SidePair, Vec<PermutationFunc>>);

impl PermutationMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a formula for `pair`.
    pub fn push(&mut self, pair: SidePair, func: PermutationFunc) {
        self.0.entry(pair).or_default().push(func);
    }

    /// Functions recorded for `pair`.
    pub fn get(&self, pair: SidePair) -> Option<&[PermutationFunc]> {
        self.0.get(&pair).map(Vec::as_slice)
    }

    /// Formula strings recorded for `pair`, in document order.
    pub fn formulas(&self, pair: SidePair) -> Vec<&str> {
        self.get(pair)
            .map(|funcs| funcs.iter().map(|f| f.formula.as_str()).collect())
            .unwrap_or_default()
    }

    /// Returns `true` if `pair` has at least one formula.
    pub fn contains(&self, pair: SidePair) -> bool {
        self.0.contains_key(&pair)
    }

    /// Iterates over pairs in side order.
    pub fn iter(&self) -> impl Iterator<Item = (SidePair, &[PermutationFunc])> {
        self.0.iter().map(|(pair, funcs)| (*pair, funcs.as_slice()))
    }

    /// Number of side pairs with formulas.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no formula has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A fully parsed `<switchblock>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchblockSpec {
    /// The `name` attribute.
    pub name: String,
    /// Uni- or bidirectional.
    pub directionality: Directionality,
    /// Wire connections in document order.
    pub wireconns: Vec<WireConn>,
    /// Permutation functions from `<switchfuncs>`.
    pub permutation_map: PermutationMap,
    /// The `<switchblock>` element.
    #[serde(skip)]
    pub span: Span,
}

impl SwitchblockSpec {
    /// Creates an empty switchblock.
    pub fn new(name: impl Into<String>, directionality: Directionality) -> Self {
        Self {
            name: name.into(),
            directionality,
            wireconns: Vec::new(),
            permutation_map: PermutationMap::new(),
            span: Span::DUMMY,
        }
    }
}
