//! Typed REDATAM query document and its line renderer.
//!
//! A document always holds one `RUNDEF` section, any number of `DEFINE`
//! sections and one `TABLE` section, in that order. The struct layout
//! enforces the order; [`QueryDocument::render`] produces the exact text
//! the query processor expects.

use super::params::AreaFilter;

const INDENT: &str = "    ";
const NESTED_INDENT: &str = "        ";

/// The `RUNDEF Job` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rundef {
    pub area_filter: Option<AreaFilter>,
    pub universe: Option<String>,
}

impl Rundef {
    fn render_into(&self, lines: &mut Vec<String>) {
        lines.push("RUNDEF Job".to_string());
        if let Some(filter) = &self.area_filter {
            lines.push(format!("{}SELECTION INLINE,", INDENT));
            // One column deeper than the SELECTION keyword.
            lines.push(format!(
                "{} {} {}",
                INDENT,
                filter.area_type(),
                filter.codes().join(", ")
            ));
        }
        if let Some(universe) = &self.universe {
            lines.push(format!("{}UNIVERSE {}", INDENT, universe));
        }
        lines.push(String::new());
    }
}

/// Declared type of a derived variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer,
}

impl ValueType {
    fn keyword(self) -> &'static str {
        match self {
            ValueType::Integer => "INTEGER",
        }
    }
}

/// A `DEFINE` section declaring a derived variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Define {
    pub name: String,
    pub expression: String,
    pub value_type: ValueType,
}

impl Define {
    /// `DEFINE <name> AS COUNT <entity> TYPE INTEGER`.
    pub fn count(name: impl Into<String>, entity: &str) -> Self {
        Define {
            name: name.into(),
            expression: format!("COUNT {}", entity),
            value_type: ValueType::Integer,
        }
    }

    fn render_into(&self, lines: &mut Vec<String>) {
        lines.push(format!("DEFINE {}", self.name));
        lines.push(format!("{}AS {}", INDENT, self.expression));
        lines.push(format!("{}TYPE {}", INDENT, self.value_type.keyword()));
        lines.push(String::new());
    }
}

/// Table kinds with a renderer. Reserved query kinds have no table kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    AreaList,
    Median,
}

impl TableKind {
    fn keyword(self) -> &'static str {
        match self {
            TableKind::AreaList => "AREALIST",
            TableKind::Median => "MEDIAN",
        }
    }
}

/// The `OF` clause of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfClause {
    /// `OF <area_level>, <v1>, <v2>...`
    Grouped {
        area_level: String,
        variables: Vec<String>,
    },
    /// `OF <variable>`
    Single(String),
}

impl OfClause {
    fn render(&self) -> String {
        match self {
            OfClause::Grouped {
                area_level,
                variables,
            } => format!("{}OF {}, {}", INDENT, area_level, variables.join(", ")),
            OfClause::Single(variable) => format!("{}OF {}", INDENT, variable),
        }
    }
}

/// The `TABLE TABLE1` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub title: Option<String>,
    pub kind: TableKind,
    pub of: OfClause,
    pub breakdowns: Vec<String>,
    pub complete_names: bool,
    pub area_break: Option<String>,
    pub total: bool,
}

impl Table {
    pub fn new(kind: TableKind, of: OfClause) -> Self {
        Table {
            title: None,
            kind,
            of,
            breakdowns: Vec::new(),
            complete_names: false,
            area_break: None,
            total: false,
        }
    }

    fn render_into(&self, lines: &mut Vec<String>) {
        lines.push("TABLE TABLE1".to_string());
        if let Some(title) = &self.title {
            lines.push(format!("{}TITLE \"{}\"", INDENT, title));
        }
        lines.push(format!("{}AS {}", INDENT, self.kind.keyword()));
        lines.push(self.of.render());
        for by in &self.breakdowns {
            lines.push(format!("{}BY {}", NESTED_INDENT, by));
        }
        if self.complete_names {
            lines.push(format!("{}COMPLETENAME", NESTED_INDENT));
        }
        if let Some(area_break) = &self.area_break {
            lines.push(format!("{}AREABREAK {}", INDENT, area_break));
        }
        if self.total {
            lines.push(format!("{}TOTAL", INDENT));
        }
    }
}

/// A complete query document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDocument {
    pub rundef: Rundef,
    pub defines: Vec<Define>,
    pub table: Table,
}

impl QueryDocument {
    /// Render to text: lines joined by `\n`, no trailing newline.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        self.rundef.render_into(&mut lines);
        for define in &self.defines {
            define.render_into(&mut lines);
        }
        self.table.render_into(&mut lines);
        lines.join("\n")
    }
}
