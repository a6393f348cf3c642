use crate::backend::CorruptionPolicy;
use std::path::PathBuf;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn templates_path(&self) -> PathBuf;
    fn bookings_file(&self) -> PathBuf;
    fn ephemeral(&self) -> bool;
    fn corruption_policy(&self) -> CorruptionPolicy;
    fn host(&self) -> String;
    fn port(&self) -> String;
}
