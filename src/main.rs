use clap::{Parser, Subcommand};
use pathfinder::graph::Weight;
use pathfinder::{find_path_within, Config, Graph, PathfinderError};
use std::path::PathBuf;
use anyhow::Result;

#[derive(Parser, Debug)]
#[command(name = "pathfinder")]
#[command(about = "Find a route between locations with a first-found depth-first search")]
struct Args {
    /// Config file (defaults to PATHFINDER_CONFIG, then ./config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Location file, overriding pathfinder.locations_file
    #[arg(short, long)]
    locations: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for a route between two locations
    Route {
        from: String,
        to: String,

        /// Join two locations both ways before searching (repeatable)
        #[arg(long = "connect", value_name = "A,B,DISTANCE")]
        connections: Vec<String>,

        /// Print the route as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print every location with its outgoing edges
    Show {
        /// Print the adjacency map as JSON
        #[arg(long)]
        json: bool,
    },
    /// List location names in load order
    Vertices,
}

/// Parse a `--connect` value of the form `A,B,DISTANCE`.
fn parse_connection(spec: &str) -> pathfinder::Result<(String, String, Weight)> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    let [a, b, distance] = parts.as_slice() else {
        return Err(PathfinderError::InvalidInput(format!(
            "expected A,B,DISTANCE, got '{}'",
            spec
        )));
    };
    if distance.is_empty() {
        return Err(PathfinderError::InvalidInput(
            "Please enter a distance value".to_string(),
        ));
    }
    let distance: Weight = distance.parse().map_err(|_| {
        PathfinderError::InvalidInput(format!("Invalid distance value '{}'", distance))
    })?;
    Ok((a.to_string(), b.to_string(), distance))
}

/// Render edges in the location file syntax, e.g. `A:B(5),C(3)`.
fn format_location_line(graph: &Graph, vertex: &str) -> String {
    let edges = graph
        .edges(vertex)
        .map(|edges| {
            edges
                .iter()
                .map(|(dest, weight)| format!("{}({})", dest, weight))
                .collect::<Vec<_>>()
                .join(",")
        })
        .unwrap_or_default();
    format!("{}:{}", vertex, edges)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", config.pathfinder.log_level.as_str())
    ).init();

    let locations = args
        .locations
        .clone()
        .unwrap_or_else(|| config.locations_file().to_path_buf());

    let mut graph = Graph::new();
    let report = graph.load_from_file(&locations, config.loader.on_malformed_line)?;
    log::info!(
        "Loaded {}: {} locations, {} edges ({} lines skipped)",
        locations.display(),
        graph.vertex_count(),
        graph.edge_count(),
        report.skipped.len()
    );

    match args.command {
        Command::Route { from, to, connections, json } => {
            for spec in &connections {
                let (a, b, distance) = parse_connection(spec)?;
                graph.connect(&a, &b, distance)?;
                log::info!("New edge added: {} <-> {} ({})", a, b, distance);
            }

            let route = find_path_within(&graph, &from, &to, config.search.max_depth);
            if json {
                println!("{}", serde_json::to_string_pretty(&route)?);
                return Ok(());
            }
            match route {
                Some(route) => {
                    println!("Path: {}", route);
                    println!("Total distance: {}", route.total_distance);
                }
                None => println!("No path found"),
            }
        }
        Command::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&graph)?);
            } else {
                for vertex in graph.vertices() {
                    println!("{}", format_location_line(&graph, vertex));
                }
            }
        }
        Command::Vertices => {
            for vertex in graph.vertices() {
                println!("{}", vertex);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathfinder::MalformedLinePolicy;

    #[test]
    fn test_parse_connection() {
        let (a, b, distance) = parse_connection("Johor, Melaka ,224").unwrap();
        assert_eq!(a, "Johor");
        assert_eq!(b, "Melaka");
        assert_eq!(distance, 224);
    }

    #[test]
    fn test_parse_connection_invalid() {
        assert!(matches!(
            parse_connection("A,B"),
            Err(PathfinderError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_connection("A,B,"),
            Err(PathfinderError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_connection("A,B,far"),
            Err(PathfinderError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_format_location_line_reloads() {
        let mut graph = Graph::new();
        graph
            .load_from_str("A:B(5),C(3)\nB:C(2)\n", MalformedLinePolicy::Abort)
            .unwrap();

        let lines: Vec<_> = graph
            .vertices()
            .map(|v| format_location_line(&graph, v))
            .collect();
        assert_eq!(lines, vec!["A:B(5),C(3)", "B:C(2)", "C:"]);

        let mut reloaded = Graph::new();
        reloaded
            .load_from_str(&lines.join("\n"), MalformedLinePolicy::Abort)
            .unwrap();
        assert_eq!(reloaded.adjacency(), graph.adjacency());
    }

    #[test]
    fn test_cli_parses_route_command() {
        let args = Args::try_parse_from([
            "pathfinder",
            "--locations",
            "states.txt",
            "route",
            "Perlis",
            "Johor",
            "--connect",
            "Perlis,Johor,700",
            "--json",
        ])
        .unwrap();

        assert_eq!(args.locations, Some(PathBuf::from("states.txt")));
        match args.command {
            Command::Route { from, to, connections, json } => {
                assert_eq!(from, "Perlis");
                assert_eq!(to, "Johor");
                assert_eq!(connections, vec!["Perlis,Johor,700"]);
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
