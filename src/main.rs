use digit_sweeper::best_score::{BestScoreStore, FileStore, MemoryStore, get_best_score_path};
use digit_sweeper::cli::{CliInterface, parse_cli};
use digit_sweeper::config::GameConfig;
use digit_sweeper::game_loop;
use digit_sweeper::logging::init_logging;
use digit_sweeper::session::GameController;
use std::io;

fn main() {
    init_logging("warn");
    let cli = parse_cli();
    let config = cli.game_config();

    let store_path = if cli.no_persist {
        None
    } else {
        cli.best_score_path.clone().or_else(get_best_score_path)
    };

    match store_path {
        Some(path) => {
            log::info!("Using best score file {}", path.display());
            play(FileStore::new(path), config);
        }
        None => {
            if !cli.no_persist {
                log::warn!("No data directory available, best score will not be saved");
            }
            play(MemoryStore::new(), config);
        }
    }
}

fn play<S: BestScoreStore>(store: S, config: GameConfig) {
    let mut controller = GameController::new(store, config);
    let stdin = io::stdin();
    let mut interface = CliInterface::new(stdin.lock(), io::stdout());
    game_loop(&mut controller, &mut interface);
}
