//! Floorgraph trace demo: builds a small plan and prints what each edit
//! touched.
//!
//! ```text
//! cargo run --example trace
//! RUST_LOG=floorgraph=trace cargo run --example trace
//! ```

use floorgraph::graph::{EdgeKind, WallPartKind};
use floorgraph::math::Point2;
use floorgraph::units::{format_area, LengthUnit};
use floorgraph::{FloorPlan, Outcome, Result};

fn report<T: std::fmt::Debug>(verb: &str, outcome: &Outcome<T>) {
    println!(
        "{verb}: {:?} (authored {} points / {} edges, derived {} points / {} rooms / {} parts)",
        outcome.value,
        outcome.authored.points.len(),
        outcome.authored.edges.len(),
        outcome.derived.points.len(),
        outcome.derived.rooms.len(),
        outcome.derived.parts.len(),
    );
}

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for floorgraph.
    // Override with RUST_LOG.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("floorgraph=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut plan = FloorPlan::new();
    let corners = [(0.0, 0.0), (400.0, 0.0), (400.0, 300.0), (0.0, 300.0)];
    let mut points = Vec::new();
    for (x, y) in corners {
        let outcome = plan.create_point(Point2::new(x, y))?;
        points.push(outcome.value);
    }

    let mut walls = Vec::new();
    for i in 0..points.len() {
        let outcome = plan.create_edge(points[i], points[(i + 1) % points.len()], EdgeKind::wall(10.0))?;
        report("wall", &outcome);
        walls.push(outcome.value);
    }

    let room = plan.create_room(&points)?;
    report("room", &room);

    let door = plan.attach_fixture(walls[0], 0.3, WallPartKind::door(80.0))?;
    report("door", &door);
    let window = plan.attach_fixture(walls[2], 0.5, WallPartKind::Window)?;
    report("window", &window);

    let split = plan.split_edge(walls[1], Point2::new(400.0, 150.0))?;
    report("split", &split);
    let moved = plan.move_point(split.value, Point2::new(460.0, 150.0))?;
    report("move", &moved);

    let data = plan.graph().room(room.value)?;
    println!(
        "room has {} corners, area {} / {}",
        data.points.len(),
        format_area(data.area, LengthUnit::Feet),
        format_area(data.area, LengthUnit::Meters),
    );
    Ok(())
}
