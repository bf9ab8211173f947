//! ヘルスチェック
//!
//! プライマリターゲットを定期的にプローブし、異常時はフォールバックターゲットで
//! クロスチェックしてフリート全体のダウンかどうかを判定する。

pub mod cross_check;
pub mod monitor;
pub mod probe;

pub use cross_check::{CrossCheckEvaluator, CrossCheckReport, Evidence, Verdict};
pub use monitor::{CycleOutcome, Monitor};
pub use probe::{HttpProber, ProbeResult, Prober};
