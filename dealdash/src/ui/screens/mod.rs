pub mod deals_screen;
pub mod logs_screen;

use crate::state::LogsState;

#[derive(Debug, Clone)]
pub enum Screen {
    Deals,
    Logs(LogsState),
}
