use std::env;

use gridmaze_core::{
    dims::Dims, gameboard::CellWall, generate_maze_seeded, solve_maze, GenAlgorithm, Maze,
};

use rand::{thread_rng, Rng as _};

fn main() {
    let args = env::args().skip(1).take(4).collect::<Vec<_>>();

    assert!(
        args.len() == 3 || args.len() == 4,
        "Usage: generate <width> <height> <dfs|prims> [seed]"
    );

    let width: i32 = args[0].parse().expect("width must be an integer");
    let height: i32 = args[1].parse().expect("height must be an integer");
    let algorithm: GenAlgorithm = args[2].parse().expect("unknown algorithm");

    let input_seed = args.get(3).map(|seed| seed.parse().expect("seed must be an integer"));
    let seed = input_seed.unwrap_or_else(|| thread_rng().gen());
    if input_seed.is_none() {
        println!("Seed: {}", seed);
    }

    let maze = generate_maze_seeded(width, height, algorithm, seed).expect("invalid size");
    let path = solve_maze(&maze).expect("generated maze is not solvable");

    show_maze(&maze, &path);
    println!("Solution: {} steps", path.len() - 1);
}

fn show_maze(maze: &Maze, path: &[Dims]) {
    let Dims(w, h) = maze.size();

    println!("+{}", "--+".repeat(w as usize));
    for y in 0..h {
        let mut line = String::from("|");
        let mut floor = String::from("+");
        for x in 0..w {
            let pos = Dims(x, y);
            line.push_str(if path.contains(&pos) { "()" } else { "  " });
            line.push(if maze.can_move(pos, CellWall::Right) { ' ' } else { '|' });
            floor.push_str(if maze.can_move(pos, CellWall::Bottom) { "  " } else { "--" });
            floor.push('+');
        }
        println!("{}", line);
        println!("{}", floor);
    }
}
