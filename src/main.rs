/*
 * Flappy Neuroevolution Simulation
 *
 * This application evolves bird controllers against a scrolling field of
 * pipe obstacles. Every generation a cohort of policies flies in lockstep;
 * birds earn fitness for surviving and passing pipes and lose it on
 * collision. The evolution engine breeds the next cohort from the returned
 * fitness scores.
 *
 * The simulation core is headless and lives in the library; this binary
 * wires it to a nannou window with egui controls.
 */

use tracing_subscriber::EnvFilter;

use flappy_neat::app;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    nannou::app(app::model).update(app::update).run();
}
