//! Scripted scenarios
//!
//! A scenario is a RON file of actions run against a sandbox followed by
//! verification conditions on the resulting canvas:
//!
//! ```ron
//! (
//!     name: "Sand drop",
//!     description: "One grain falls to the floor",
//!     config: Some((canvas_width: 5, canvas_height: 5)),
//!     actions: [
//!         ResizeBrush(steps: -3),
//!         Draw(x: 2, y: 1),
//!         Tick(count: 3),
//!     ],
//!     verify: [ParticleAt(row: 3, col: 2, expected: Sand)],
//! )
//! ```

mod actions;
mod definition;
mod executor;
mod results;
mod verification;

pub use actions::ScenarioAction;
pub use definition::ScenarioDefinition;
pub use executor::{ScenarioExecutor, ScenarioExecutorConfig};
pub use results::{ExecutionReport, Timings};
pub use verification::{Region, VerificationCondition, VerificationResult};
