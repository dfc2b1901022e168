use std::path::Path;

use gameloggr_model::HelpfulLink;

use crate::cli_types::LinkAction;
use crate::CliError;

use super::{open_store, resolve_game};

pub(crate) fn run(db: Option<&Path>, action: LinkAction) -> Result<(), CliError> {
    let conn = open_store(db)?;
    match action {
        LinkAction::Add { game, name, url } => {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CliError::input(format!("'{}' is not an http(s) URL", url)));
            }
            let game = resolve_game(&conn, &game)?;
            let id = gameloggr_db::add_helpful_link(&conn, game.id, &HelpfulLink::new(name, url))?;
            log::info!("Added link {} to {}", id, game.title);
        }
        LinkAction::Delete { id } => {
            gameloggr_db::delete_helpful_link(&conn, id)?;
            log::info!("Deleted link {}", id);
        }
    }
    Ok(())
}
