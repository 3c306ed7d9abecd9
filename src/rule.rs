use std::fmt;

use crate::{error::Result, Cell, Error};

/// A cell together with its left and right neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    pub left: Cell,
    pub center: Cell,
    pub right: Cell,
}

#[macro_export]
macro_rules! neighborhood {
    ($left:expr, $center:expr, $right:expr) => {
        Neighborhood {
            left: $left,
            center: $center,
            right: $right,
        }
    };
}

impl Neighborhood {
    /// the neighborhood read as a 3-bit number, `left*4 + center*2 + right`.
    pub fn code(&self) -> u8 {
        (self.left.bit() << 2) | (self.center.bit() << 1) | self.right.bit()
    }

    pub fn from_code(code: u8) -> Self {
        neighborhood!(
            Cell::from(code & 0b100 != 0),
            Cell::from(code & 0b010 != 0),
            Cell::from(code & 0b001 != 0)
        )
    }
}

/// Transition table of an elementary automaton, indexed by neighborhood code.
///
/// Follows Wolfram's numbering: writing the rule as an 8-digit binary string,
/// neighborhood `111` takes the first digit and `000` the last. Equivalently
/// code `c` takes bit `c` of the rule number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleTable {
    rule: u8,
    states: [Cell; 8],
}

impl RuleTable {
    /// Builds the table for `rule_number`, rejecting anything outside `0..=255`.
    pub fn build(rule_number: i64) -> Result<Self> {
        let rule = u8::try_from(rule_number).map_err(|_| Error::InvalidRuleNumber(rule_number))?;
        Ok(Self::from_rule(rule))
    }

    pub fn from_rule(rule: u8) -> Self {
        let mut states = [Cell::dead(); 8];
        for (code, state) in states.iter_mut().enumerate() {
            *state = Cell::from((rule >> code) & 1 == 1);
        }
        Self { rule, states }
    }

    pub fn rule(&self) -> u8 {
        self.rule
    }

    pub fn lookup(&self, neighborhood: Neighborhood) -> Cell {
        self.lookup_code(neighborhood.code())
    }

    /// # Panics
    /// if `code` is not a 3-bit value.
    pub fn lookup_code(&self, code: u8) -> Cell {
        self.states[code as usize]
    }
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rule {}", self.rule)?;
        let neighborhoods = (0..8u8).rev().map(Neighborhood::from_code);
        let patterns = neighborhoods
            .clone()
            .map(|n| format!("{}{}{}", n.left.bit(), n.center.bit(), n.right.bit()))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(f, "{patterns}")?;
        let states = neighborhoods
            .map(|n| format!(" {} ", self.lookup(n).bit()))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{states}")
    }
}
