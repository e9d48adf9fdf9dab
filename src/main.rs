use sectorfs::{logging, shell::start_shell};

fn main() {
    logging::init();
    start_shell();
}
