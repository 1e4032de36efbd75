use docopt::Docopt;
use maze_escape::{
    cells::Cartesian2DCoordinate,
    config::LayoutConfig,
    game::{Game, GamePhase},
    grid::Grid,
    grid_displays::{GridDisplay, LayeredDisplay, PathDisplay, StartEndPointsDisplay,
                    TextRendering},
    input::InputEvent,
    navigation::MoveOutcome,
    pacing::{CancellationToken, Pacer},
    pathing,
    renderers::ImageSurface,
    units::{Height, Width},
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
    time::Duration,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Maze Escape

Generate a perfect maze, then find the way from the top left cell to the bottom right one.

Usage:
    maze_escape -h | --help
    maze_escape [options]
    maze_escape play [options]
    maze_escape window [options]

Commands:
    play                   After generation read moves from stdin, one or more per line: key codes
                           (ArrowUp, KeyD, ...) separated by spaces, or runs of w, a, s and d.
    window                 Watch the maze being carved and play it in a window. Needs the sdl feature.

Options:
    -h --help              Show this screen.
    --viewport-width=<w>   Width in pixels of the space to fit the maze into [default: 800].
    --viewport-height=<h>  Height in pixels of the space to fit the maze into [default: 800].
    --difficulty=<n>       Cells across the maze [default: 20].
    --seed=<n>             Seed for the random number generator, for a repeatable maze.
    --delay-ms=<n>         Pause between generation steps. Only the window pauses by default, 5ms.
    --text                 Print a text rendering of the maze.
    --text-out=<path>      Output file path for a text rendering of the maze.
    --image-out=<path>     Output file path for an image rendering of the maze. Always PNG format.
    --show-path            Show the shortest path from the start to the end point.
    --solve                Run the depth first solver and show the route it marks.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --moves=<keys>         Comma separated key codes to play once the maze is generated.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_play: bool,
    cmd_window: bool,
    flag_viewport_width: u32,
    flag_viewport_height: u32,
    flag_difficulty: u32,
    flag_seed: Option<u64>,
    flag_delay_ms: Option<u64>,
    flag_text: bool,
    flag_text_out: String,
    flag_image_out: String,
    flag_show_path: bool,
    flag_solve: bool,
    flag_save_edges: String,
    flag_moves: String,
}

// The binary's own errors wrap the library errors and argument parsing failures.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_escape::errors::Error, ::maze_escape::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let layout = LayoutConfig::new(Width(args.flag_viewport_width),
                                   Height(args.flag_viewport_height),
                                   args.flag_difficulty)
        .layout()?;
    info!(rows = layout.rows().0,
          columns = layout.columns().0,
          cell_size = layout.cell_size(),
          "maze layout");

    let mut rng = match args.flag_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let solver_rng = StdRng::seed_from_u64(rng.gen());
    let mut game = Game::new(&layout, rng)?;
    let cancel = CancellationToken::new();

    if args.cmd_window {
        let pacer = args.flag_delay_ms
            .map(|ms| Pacer::new(Duration::from_millis(ms)))
            .unwrap_or_default();
        return run_window(game, &pacer, &cancel);
    }

    let pacer = Pacer::new(Duration::from_millis(args.flag_delay_ms.unwrap_or(0)));
    pacer.run(&cancel, || game.tick() != maze_escape::generators::GenerationStep::Finished);

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(game.grid(), &args.flag_save_edges)?;
    }

    let solution = if args.flag_solve {
        let route = game.solve(solver_rng);
        match route {
            Some(ref route) => info!(cells = route.len(), "solver found the way out"),
            None => warn!("solver found no way out"),
        }
        route
    } else {
        None
    };

    let shortest = if args.flag_show_path {
        shortest_route(game.grid())
    } else {
        None
    };

    if !args.flag_moves.is_empty() {
        for code in args.flag_moves.split(',').map(str::trim).filter(|code| !code.is_empty()) {
            report_move(code, game.handle_input(&InputEvent::KeyDown(String::from(code))));
        }
    }

    if args.cmd_play {
        play_from_stdin(&mut game)?;
    }

    let path = shortest.or(solution);
    let text = maze_text(&game, path.as_ref().map(Vec::as_slice));

    let any_output = args.flag_text || !args.flag_text_out.is_empty() ||
                     !args.flag_image_out.is_empty() || !args.flag_save_edges.is_empty() ||
                     args.cmd_play;
    if args.flag_text || !any_output {
        println!("{}", text);
    }

    if !args.flag_text_out.is_empty() {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if !args.flag_image_out.is_empty() {
        let mut surface = ImageSurface::for_grid(game.grid(), game.cell_size());
        game.render(&mut surface)?;
        surface.save_png(&args.flag_image_out)
            .chain_err(|| format!("Failed to write maze image {}", args.flag_image_out))?;
    }

    Ok(())
}

#[cfg(feature = "sdl")]
fn run_window(game: Game<StdRng>, pacer: &Pacer, cancel: &CancellationToken) -> Result<()> {
    maze_escape::sdl::run_window(game, pacer, cancel)?;
    Ok(())
}

#[cfg(not(feature = "sdl"))]
fn run_window(_: Game<StdRng>, _: &Pacer, _: &CancellationToken) -> Result<()> {
    error_chain::bail!("the window needs a build with the sdl feature enabled: cargo run --features sdl")
}

fn shortest_route(grid: &Grid) -> Option<Vec<Cartesian2DCoordinate>> {
    let distances = pathing::Distances::new(grid, grid.first_coordinate())?;
    pathing::shortest_path(grid, &distances, grid.last_coordinate())
}

/// The maze as text. The player shows as `S` and the destination as `E`, path cells as dots.
fn maze_text<R: Rng>(game: &Game<R>, path: Option<&[Cartesian2DCoordinate]>) -> String {
    let grid = game.grid();
    let (player, destination) = match game.navigator() {
        Some(navigator) => (navigator.player(), navigator.destination()),
        None => (grid.first_coordinate(), grid.last_coordinate()),
    };
    let points = StartEndPointsDisplay::new(vec![player], vec![destination]);
    let path_display = PathDisplay::new(path.unwrap_or(&[]));
    let layers = LayeredDisplay::new(vec![&points as &dyn GridDisplay, &path_display]);
    format!("{}", TextRendering::new(grid, Some(&layers as &dyn GridDisplay)))
}

fn report_move(request: &str, outcome: Option<MoveOutcome>) {
    match outcome {
        Some(MoveOutcome::Moved(to)) => println!("{} -> {}", request, to),
        Some(MoveOutcome::Blocked) => println!("{} -> blocked", request),
        Some(MoveOutcome::Escaped) => println!("{} -> You Escaped!!", request),
        Some(MoveOutcome::GameOver) => println!("{} -> the game is over", request),
        None => println!("{} -> ignored", request),
    }
}

/// Split a line of input into key codes. Runs of wasd letters expand to one key each.
fn line_to_key_codes(line: &str) -> Vec<String> {
    let mut codes = Vec::new();
    for word in line.split_whitespace() {
        let is_wasd = word.chars().all(|c| "wasdWASD".contains(c));
        if is_wasd {
            codes.extend(word.chars().map(|c| format!("Key{}", c.to_ascii_uppercase())));
        } else {
            codes.push(String::from(word));
        }
    }
    codes
}

fn play_from_stdin<R: Rng>(game: &mut Game<R>) -> Result<()> {
    println!("{}", maze_text(game, None));
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        for code in line_to_key_codes(&line) {
            let outcome = game.handle_input(&InputEvent::KeyDown(code.clone()));
            report_move(&code, outcome);
        }
        println!("{}", maze_text(game, None));
        if game.phase() == GamePhase::Escaped {
            break;
        }
    }
    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    graph_data.push_str(&format!("{} {}\n", maze_grid.size(), maze_grid.links_count()));

    for (src, dst) in maze_grid.iter_links() {
        let index_a = maze_grid
            .grid_coordinate_to_index(src)
            .expect("Links iter should give valid coordinate");
        let index_b = maze_grid
            .grid_coordinate_to_index(dst)
            .expect("Links iter should give valid coordinate");
        graph_data.push_str(&format!("{} {}\n", index_a + 1, index_b + 1));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
