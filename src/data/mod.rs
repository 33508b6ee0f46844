//! Data layer: keyed tables, loading, alignment and CSV output.
//!
//! Architecture:
//! ```text
//!  task-*.txt        otutable.txt[suffix]
//!      │                    │
//!      ▼                    ▼
//!   ┌──────────┐      ┌──────────┐
//!   │  loader   │      │  loader   │  tab-separated → Table
//!   │  (plain)  │      │(transpose)│
//!   └──────────┘      └──────────┘
//!        │                  │
//!        └────────┬─────────┘
//!                 ▼
//!           ┌──────────┐
//!           │  align    │  keep samples present in both, feature order
//!           └──────────┘
//!                 │
//!                 ▼
//!           ┌──────────┐
//!           │  writer   │  {base}-x.csv + {base}-y.csv
//!           └──────────┘
//! ```

pub mod align;
pub mod loader;
pub mod model;
pub mod writer;
