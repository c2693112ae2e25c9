//! Basic physics simulation example
//!
//! This example drops a ball and a box onto a static floor.

use impulse2d::prelude::*;

fn main() {
    println!("impulse2d - Basic Simulation Example");
    println!("====================================\n");

    // Create physics world with default settings
    let mut world = PhysicsWorld::new(WorldSettings::default().with_collision_precision(6));

    // Create a static floor
    let floor = world
        .add_box(0.0, 0.0, 20.0, 1.0, Material::STATIC)
        .expect("floor dimensions are positive");
    println!("Created floor at Y=0 (top surface at Y=0.5)");

    // Create a dynamic ball and a wooden crate beside it
    let ball = world
        .add_circle(-2.0, 5.0, 0.5, Material::BOUNCY)
        .expect("ball radius is positive");
    let crate_box = world
        .add_box(2.0, 3.0, 1.0, 1.0, Material::WOOD)
        .expect("crate dimensions are positive");
    world.set_body_angular_velocity(crate_box, 1.5);
    println!("Created ball at Y=5.0 (radius=0.5) and crate at Y=3.0\n");

    // Simulation parameters
    let dt = 1.0 / 60.0;
    let total_time = 3.0;
    let frames = (total_time / dt) as usize;

    println!("Simulating {} seconds ({} frames at {}Hz)...\n", total_time, frames, 1.0 / dt);

    for i in 0..frames {
        world.advance(dt);

        // Print position every 30 frames (0.5 seconds)
        if i % 30 == 0 {
            let pos = world.body_position(ball);
            let vel = world.body_velocity(ball);
            println!(
                "t={:.2}s: ball=({:.3}, {:.3}) v=({:.3}, {:.3}) crate angle={:.3} contacts={}",
                world.time(),
                pos.x,
                pos.y,
                vel.x,
                vel.y,
                world.body_orientation(crate_box),
                world.collisions().len()
            );
        }
    }

    let final_pos = world.body_position(ball);
    println!("\nFinal ball position: ({:.3}, {:.3})", final_pos.x, final_pos.y);
    println!("Expected resting position: ~(-2, 1.0) (floor top at 0.5 + ball radius 0.5)");
    println!(
        "Ball touching floor: {}, crate touching floor: {}",
        world.is_touching(ball, floor),
        world.is_touching(crate_box, floor)
    );
}
