//! Import progress reporting.

use crate::import::ImportResult;

/// The record kinds an import walks through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    /// Replace mode only: the store is emptied first.
    Clearing,
    Platforms,
    Hardware,
    Games,
    /// Collection parent links, resolved once every game exists.
    CollectionLinks,
}

impl ImportStage {
    pub fn noun(self) -> &'static str {
        match self {
            Self::Clearing => "existing records",
            Self::Platforms => "platforms",
            Self::Hardware => "hardware items",
            Self::Games => "games",
            Self::CollectionLinks => "collection links",
        }
    }
}

/// What happened to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Newly written to the store.
    Added,
    /// Already present and left untouched.
    Kept,
    /// A collection link whose parent could not be found.
    Unlinked,
}

pub trait TransferProgress {
    /// A stage starts with `total` records to process.
    fn on_stage(&self, stage: ImportStage, total: usize);

    /// One record of `stage` was processed. `label` is a title or name.
    fn on_item(
        &self,
        stage: ImportStage,
        current: usize,
        total: usize,
        label: &str,
        outcome: ItemOutcome,
    );

    fn on_complete(&self, result: &ImportResult);
}

/// Discards all updates.
pub struct SilentProgress;

impl TransferProgress for SilentProgress {
    fn on_stage(&self, _stage: ImportStage, _total: usize) {}
    fn on_item(&self, _: ImportStage, _: usize, _: usize, _: &str, _: ItemOutcome) {}
    fn on_complete(&self, _result: &ImportResult) {}
}

/// Reports through the `log` crate: stages at info, records at debug, and
/// a running count every 100 games.
pub struct LogProgress;

impl TransferProgress for LogProgress {
    fn on_stage(&self, stage: ImportStage, total: usize) {
        match stage {
            ImportStage::Clearing => log::info!("Clearing {}", stage.noun()),
            _ if total == 0 => log::debug!("No {} to import", stage.noun()),
            _ => log::info!("Importing {} {}", total, stage.noun()),
        }
    }

    fn on_item(
        &self,
        stage: ImportStage,
        current: usize,
        total: usize,
        label: &str,
        outcome: ItemOutcome,
    ) {
        match outcome {
            ItemOutcome::Added => log::debug!("  added {}", label),
            ItemOutcome::Kept => log::debug!("  kept existing {}", label),
            ItemOutcome::Unlinked => log::debug!("  unlinked {}", label),
        }
        if stage == ImportStage::Games && (current % 100 == 0 || current == total) {
            log::info!("  [{}/{}] {}", current, total, label);
        }
    }

    fn on_complete(&self, result: &ImportResult) {
        log::info!(
            "Imported {} games, {} platforms, {} hardware",
            result.games_imported,
            result.platforms_imported,
            result.hardware_imported,
        );
    }
}
