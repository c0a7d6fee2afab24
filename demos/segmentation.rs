use graph_cut::maximum_flow::graph::Graph;
use graph_cut::maximum_flow::status::Segment;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// grey levels of a tiny image, a bright blob on a dark background
const IMAGE: [&str; 6] = ["112211", "179821", "289982", "189971", "127721", "111111"];

// user strokes: F marks foreground, B background, '.' unknown
const STROKES: [&str; 6] = ["B.....", "......", "...F..", "......", "......", ".....B"];

const HARD: i64 = 1_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,graph_cut=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (width, height) = (IMAGE[0].len(), IMAGE.len());
    let intensity = |x: usize, y: usize| i64::from(IMAGE[y].as_bytes()[x] - b'0');

    let mut graph = Graph::with_capacity(width * height, 2 * width * height);
    let pixels = graph.add_nodes(width * height)?;
    let at = |x: usize, y: usize| pixels[y * width + x];

    for y in 0..height {
        for x in 0..width {
            // similar neighbours are expensive to separate
            if x + 1 < width {
                let w = 10 - (intensity(x, y) - intensity(x + 1, y)).abs();
                graph.add_edge(at(x, y), at(x + 1, y), w, w)?;
            }
            if y + 1 < height {
                let w = 10 - (intensity(x, y) - intensity(x, y + 1)).abs();
                graph.add_edge(at(x, y), at(x, y + 1), w, w)?;
            }

            match STROKES[y].as_bytes()[x] {
                b'F' => graph.set_terminal_weights(at(x, y), HARD, 0)?,
                b'B' => graph.set_terminal_weights(at(x, y), 0, HARD)?,
                // bright pixels lean towards the foreground
                _ => graph.set_terminal_weights(at(x, y), intensity(x, y), 9 - intensity(x, y))?,
            }
        }
    }

    let flow = graph.solve()?;
    println!("minimum cut: {flow}");
    for y in 0..height {
        let row: String = (0..width)
            .map(|x| match graph.segment_of(at(x, y)) {
                Segment::Source => '#',
                Segment::Sink => '.',
            })
            .collect();
        println!("{row}");
    }
    Ok(())
}
