use serde::{Deserialize, Serialize};

use drill_core::{AnswerSummary, Item};

//
// ─── TEXT REPORT ───────────────────────────────────────────────────────────────
//

/// The three text blocks a renderer displays for a drill run.
///
/// The line formats are an observable contract consumed outside the core:
/// - per set: `A vs B: 2/3 = 67 (AbA)`
/// - per item: `A 1/2 = 50`
/// - overall: `overall 3/5 = 60`
///
/// An empty log yields empty blocks; no percentage is ever derived from a
/// zero total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillReport {
    per_set: String,
    per_item: String,
    overall: String,
}

impl DrillReport {
    /// Renders the report from an already-computed summary.
    #[must_use]
    pub fn from_summary(summary: &AnswerSummary) -> Self {
        let per_set = summary
            .per_set()
            .iter()
            .map(|set| {
                format!(
                    "{}: {}/{} = {} ({})",
                    join_choices(set.choices()),
                    set.correct(),
                    set.total(),
                    set.percent().unwrap_or(0),
                    set.history(),
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let per_item = summary
            .per_item()
            .iter()
            .map(|stats| {
                format!(
                    "{} {}/{} = {}",
                    stats.item(),
                    stats.correct(),
                    stats.total(),
                    stats.percent().unwrap_or(0),
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let overall = match summary.percent() {
            Some(percent) => format!(
                "overall {}/{} = {}",
                summary.total_correct(),
                summary.total_answered(),
                percent,
            ),
            None => String::new(),
        };

        Self {
            per_set,
            per_item,
            overall,
        }
    }

    #[must_use]
    pub fn per_set(&self) -> &str {
        &self.per_set
    }

    #[must_use]
    pub fn per_item(&self) -> &str {
        &self.per_item
    }

    #[must_use]
    pub fn overall(&self) -> &str {
        &self.overall
    }

    /// Joins the non-empty blocks with blank lines, ready for a plain-text
    /// surface such as a clipboard export.
    #[must_use]
    pub fn to_text(&self) -> String {
        [&self.per_set, &self.per_item, &self.overall]
            .iter()
            .filter(|block| !block.is_empty())
            .map(|block| block.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn join_choices(choices: &[Item]) -> String {
    choices
        .iter()
        .map(Item::as_str)
        .collect::<Vec<_>>()
        .join(" vs ")
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
