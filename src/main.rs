use std::path::PathBuf;

use clap::Parser;
use grid_packer::api::{AutoPlaceRequest, AutoPlaceResponse};
use grid_packer::render;
use grid_packer::types::{GridBounds, Rect, TaggedShape};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "grid_packer",
    about = "Pack rectangles into free space of a cell grid"
)]
struct Cli {
    /// Grid dimensions in cells (WxH, e.g. 30x20)
    #[arg(long, required_unless_present = "input")]
    grid: Option<String>,

    /// Shapes already on the grid as X,Y:WxH (e.g. 0,0:5x5 6,0:2x3)
    #[arg(long = "target", num_args = 1..)]
    target: Vec<String>,

    /// Shapes to place as WxH (e.g. 4x4 2x2)
    #[arg(long = "shapes", num_args = 1..)]
    shapes: Vec<String>,

    /// Read grid, target and shapes from a JSON file instead
    #[arg(long, conflicts_with_all = ["grid", "target", "shapes"])]
    input: Option<PathBuf>,

    /// Show ASCII layout of the grid
    #[arg(long)]
    layout: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Log each placement decision to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("invalid size '{}', expected WxH", s));
    }
    let width = parts[0]
        .parse::<u32>()
        .map_err(|_| format!("invalid width in '{}'", s))?;
    let height = parts[1]
        .parse::<u32>()
        .map_err(|_| format!("invalid height in '{}'", s))?;
    if width == 0 || height == 0 {
        return Err(format!("dimensions must be non-zero in '{}'", s));
    }
    Ok((width, height))
}

fn parse_grid(s: &str) -> Result<GridBounds, String> {
    let (width, height) = parse_size(s)?;
    GridBounds::new(width, height).map_err(|e| e.to_string())
}

fn parse_target(s: &str) -> Result<TaggedShape, String> {
    let (pos, size) = s
        .split_once(':')
        .ok_or_else(|| format!("invalid shape '{}', expected X,Y:WxH", s))?;
    let (x, y) = pos
        .split_once(',')
        .ok_or_else(|| format!("invalid position in '{}', expected X,Y", s))?;
    let x = x
        .parse::<u32>()
        .map_err(|_| format!("invalid x in '{}'", s))?;
    let y = y
        .parse::<u32>()
        .map_err(|_| format!("invalid y in '{}'", s))?;
    let (width, height) = parse_size(size)?;
    Ok(TaggedShape::new(Rect::new(x, y, width, height)))
}

fn parse_candidate(s: &str) -> Result<TaggedShape, String> {
    let (width, height) = parse_size(s)?;
    Ok(TaggedShape::new(Rect::new(0, 0, width, height)))
}

fn build_request(cli: &Cli) -> Result<AutoPlaceRequest, String> {
    if let Some(path) = &cli.input {
        let data = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        return serde_json::from_str(&data)
            .map_err(|e| format!("invalid input in {}: {}", path.display(), e));
    }

    let grid = parse_grid(cli.grid.as_deref().unwrap_or_default())?;
    let target = cli
        .target
        .iter()
        .map(|s| parse_target(s))
        .collect::<Result<Vec<_>, _>>()?;
    let shapes = cli
        .shapes
        .iter()
        .map(|s| parse_candidate(s))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AutoPlaceRequest {
        grid,
        target,
        shapes,
    })
}

fn print_report(req: &AutoPlaceRequest, resp: &AutoPlaceResponse, layout: bool) {
    println!("Grid {}:", req.grid);
    for (i, shape) in resp.placed.iter().enumerate() {
        let locked = if i < req.target.len() { " [locked]" } else { "" };
        println!("  {} {}{}", render::label(i), shape.rect, locked);
    }
    if layout {
        print!("{}", render::render_grid(&resp.placed, req.grid));
    }

    if !resp.unplaced.is_empty() {
        println!("Unplaced:");
        for shape in &resp.unplaced {
            println!("  {}", shape.rect.size());
        }
    }
    println!();

    let stats = &resp.stats;
    println!(
        "Summary: {} placed, {} unplaced, {:.1}% of grid used",
        stats.placed_count - req.target.len(),
        stats.unplaced_count,
        stats.grid_utilization_percent,
    );
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let req = build_request(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let resp = req.run().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if cli.json {
        match serde_json::to_string_pretty(&resp) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_report(&req, &resp, cli.layout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("30x20"), Ok((30, 20)));
        assert!(parse_size("30").is_err());
        assert!(parse_size("0x5").is_err());
        assert!(parse_size("-1x5").is_err());
        assert!(parse_size("axb").is_err());
    }

    #[test]
    fn test_parse_grid_rejects_oversized() {
        let err = parse_grid("4294967295x4294967295").unwrap_err();
        assert!(err.contains("too large"), "{err}");
        assert!(parse_grid("4096x4096").is_ok());
    }

    #[test]
    fn test_parse_target() {
        let shape = parse_target("3,4:2x5").unwrap();
        assert_eq!(shape.rect, Rect::new(3, 4, 2, 5));
        assert!(parse_target("3:2x5").is_err());
        assert!(parse_target("3,4").is_err());
    }

    #[test]
    fn test_build_request_from_flags() {
        let cli = Cli::parse_from([
            "grid_packer",
            "--grid",
            "10x10",
            "--target",
            "0,0:5x5",
            "--shapes",
            "5x5",
            "11x1",
        ]);
        let req = build_request(&cli).unwrap();
        let resp = req.run().unwrap();
        assert_eq!(resp.placed[1].rect, Rect::new(5, 0, 5, 5));
        assert_eq!(resp.unplaced.len(), 1);
    }
}
