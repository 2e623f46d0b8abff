//! Verification conditions and state checks for scenarios

use grainfall_core::simulation::ParticleKind;
use grainfall_core::{Canvas, Sandbox};
use serde::{Deserialize, Serialize};

/// Conditions that can be verified against sandbox state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VerificationCondition {
    // === PARTICLE CHECKS ===
    /// Assert the kind held by one cell
    ParticleAt {
        row: usize,
        col: usize,
        expected: ParticleKind,
    },

    /// Assert how many cells of a kind lie in a region
    ParticleCount {
        kind: ParticleKind,
        region: Region,
        expected: usize,
        #[serde(default)]
        tolerance: Option<usize>, // Allow ±N variance
    },

    /// Assert a region holds nothing but air (border cells are ignored)
    RegionEmpty { region: Region },

    // === RENDER CHECKS ===
    /// Assert the render list has at most `max` rectangles
    PrefabLenAtMost { max: usize },

    // === LOGICAL OPERATORS ===
    /// All conditions must pass
    All {
        conditions: Vec<VerificationCondition>,
    },

    /// Any condition must pass
    Any {
        conditions: Vec<VerificationCondition>,
    },

    /// Condition must NOT pass
    Not {
        condition: Box<VerificationCondition>,
    },
}

/// Cell region for verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    /// Rectangle of `rows x cols` cells with its top-left at (row, col)
    Rect {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Entire canvas
    Whole,
}

impl Region {
    /// In-bounds (row, col) pairs covered by the region
    fn cells(self, canvas: &Canvas) -> impl Iterator<Item = (usize, usize)> {
        let (row, col, rows, cols) = match self {
            Region::Rect {
                row,
                col,
                rows,
                cols,
            } => (row, col, rows, cols),
            Region::Whole => (0, 0, canvas.height(), canvas.width()),
        };
        let row_end = row.saturating_add(rows).min(canvas.height());
        let col_end = col.saturating_add(cols).min(canvas.width());
        (row..row_end).flat_map(move |r| (col..col_end).map(move |c| (r, c)))
    }
}

/// Result of a verification check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub passed: bool,
    pub message: String,
    pub actual_value: Option<String>, // For debugging
}

impl VerificationCondition {
    /// Evaluate against the current canvas and render list
    pub fn evaluate(&self, sandbox: &Sandbox) -> VerificationResult {
        let canvas = sandbox.canvas();
        match self {
            VerificationCondition::ParticleAt { row, col, expected } => {
                let actual = canvas.kind_at(*row, *col);
                let actual_value = match actual {
                    Some(kind) => kind.to_string(),
                    None => "out of bounds".to_string(),
                };

                VerificationResult {
                    passed: actual == Some(*expected),
                    message: format!(
                        "Particle at ({}, {}): expected {}, got {}",
                        row, col, expected, actual_value
                    ),
                    actual_value: Some(actual_value),
                }
            }

            VerificationCondition::ParticleCount {
                kind,
                region,
                expected,
                tolerance,
            } => {
                let actual = count_kind_in_region(canvas, *kind, region);
                let tol = tolerance.unwrap_or(0);
                let passed = actual >= expected.saturating_sub(tol) && actual <= expected + tol;

                VerificationResult {
                    passed,
                    message: format!(
                        "{} count in {:?}: expected {}±{}, got {}",
                        kind, region, expected, tol, actual
                    ),
                    actual_value: Some(actual.to_string()),
                }
            }

            VerificationCondition::RegionEmpty { region } => {
                let occupied = region
                    .cells(canvas)
                    .filter(|&(r, c)| {
                        canvas
                            .get(r, c)
                            .is_some_and(|p| !p.is_air() && !p.is_border())
                    })
                    .count();

                VerificationResult {
                    passed: occupied == 0,
                    message: format!(
                        "Region {:?} empty: {} non-air cells found",
                        region, occupied
                    ),
                    actual_value: Some(occupied.to_string()),
                }
            }

            VerificationCondition::PrefabLenAtMost { max } => {
                let actual = sandbox.prefab().len();

                VerificationResult {
                    passed: actual <= *max,
                    message: format!("Prefab length: expected <= {}, got {}", max, actual),
                    actual_value: Some(actual.to_string()),
                }
            }

            VerificationCondition::All { conditions } => {
                let mut all_passed = true;
                let mut messages = Vec::new();

                for cond in conditions {
                    let result = cond.evaluate(sandbox);
                    if !result.passed {
                        all_passed = false;
                    }
                    messages.push(format!("  - {}", result.message));
                }

                VerificationResult {
                    passed: all_passed,
                    message: format!("All conditions:\n{}", messages.join("\n")),
                    actual_value: None,
                }
            }

            VerificationCondition::Any { conditions } => {
                let mut any_passed = false;
                let mut messages = Vec::new();

                for cond in conditions {
                    let result = cond.evaluate(sandbox);
                    if result.passed {
                        any_passed = true;
                    }
                    messages.push(format!("  - {}", result.message));
                }

                VerificationResult {
                    passed: any_passed,
                    message: format!("Any condition:\n{}", messages.join("\n")),
                    actual_value: None,
                }
            }

            VerificationCondition::Not { condition } => {
                let result = condition.evaluate(sandbox);
                VerificationResult {
                    passed: !result.passed,
                    message: format!("NOT ({})", result.message),
                    actual_value: result.actual_value,
                }
            }
        }
    }
}

/// Count cells of `kind` in region
fn count_kind_in_region(canvas: &Canvas, kind: ParticleKind, region: &Region) -> usize {
    match region {
        Region::Whole => canvas.count(kind),
        Region::Rect { .. } => region
            .cells(canvas)
            .filter(|&(r, c)| canvas.kind_at(r, c) == Some(kind))
            .count(),
    }
}
