//! Walk through a small construction and print resolved coordinates.
//!
//! Usage:
//!   cargo run -p symgeo --example construction_tour
//!
//! Builds a triangle on two anchors and one dynamic point, then moves an anchor
//! and shows what follows and what regenerates. Trace events show each redraw.

use anyhow::Result;
use symgeo::prelude::*;
use tracing_subscriber::fmt::SubscriberBuilder;

fn show(field: &dyn Field<f64>, name: &str, p: &Point<f64>) -> Result<()> {
    let (x, y) = p.actual(field)?;
    println!("{name:>10} = ({x:8.4}, {y:8.4})");
    Ok(())
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(tracing::Level::TRACE)
        .init();
    let f = DblField::new(DblCfg {
        seed: Some(2025),
        ..DblCfg::default()
    })?;

    let a = Anchor::new("A", 0.0, 0.0);
    let b = Anchor::new("B", 4.0, 0.0);
    let ab = Line::through(a.point(), b.point());
    let c = DynamicPoint::outside_line("C", ab.clone());

    let m = construct::midpoint(&a.point(), &b.point());
    let foot = construct::foot_of_perpendicular(&ab, &c.point());
    let circum = construct::circle_through_three(&f, &a.point(), &b.point(), &c.point());

    println!("initial");
    show(&f, "A", &a.point())?;
    show(&f, "B", &b.point())?;
    show(&f, "C", &c.point())?;
    show(&f, "mid(AB)", &m)?;
    show(&f, "foot(C)", &foot)?;
    show(&f, "center", circum.center())?;

    // B moves along AB: C stays off the line, nothing regenerates.
    b.set(6.0, 0.0);
    println!("B slides along AB");
    show(&f, "C", &c.point())?;
    show(&f, "mid(AB)", &m)?;

    // A moves onto C's line position: the probe fails and C is redrawn.
    let (cx, cy) = c.position(&f)?;
    a.set(cx - 1.0, cy);
    b.set(cx + 1.0, cy);
    println!("AB moved through C");
    show(&f, "C", &c.point())?;
    println!(
        "{:>10} = {}",
        "C off AB",
        !Relation::PointInLine(c.point(), ab.clone()).holds(&f)?
    );

    // Deferred failure: a chord through a point that is not on the circle.
    let bad = construct::chord_through(&f, &circum, &m);
    match bad.a().actual(&f) {
        Ok(p) => println!("unexpected chord end {p:?}"),
        Err(e) => println!("{:>10} : {e}", "chord"),
    }

    // Over GF(p) the same relations hold exactly; ordered draws are deferred.
    let gf = PrimeField::seeded(101, 7)?;
    let l = Line::through(Point::at(1u64, 2), Point::at(5, 9));
    let q = construct::point_in_line(&gf, &l);
    let (qx, qy) = q.actual(&gf)?;
    let on = Relation::PointInLine(q, l).holds(&gf)?;
    println!("{:>10} = ({qx}, {qy}) on line: {on}", "GF(101)");
    Ok(())
}
