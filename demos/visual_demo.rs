//! Visual demo of the physics engine using macroquad
//!
//! Run with: cargo run --example visual_demo

use macroquad::prelude::*;
use impulse2d::debug::DebugShape;
use impulse2d::geometry::{Polygon, Shape};
use impulse2d::math::Point;
use impulse2d::material::Material;
use impulse2d::{PhysicsWorld, WorldSettings};

// Window settings
const WINDOW_WIDTH: f32 = 1000.0;
const WINDOW_HEIGHT: f32 = 700.0;

// Physics to screen conversion (pixels per meter)
const SCALE: f32 = 40.0;

// Convert physics Y (up) to screen Y (down)
fn physics_to_screen(pos: Point) -> (f32, f32) {
    let x = WINDOW_WIDTH / 2.0 + pos.x * SCALE;
    let y = WINDOW_HEIGHT - 80.0 - pos.y * SCALE;
    (x, y)
}

fn screen_to_physics(x: f32, y: f32) -> (f32, f32) {
    ((x - WINDOW_WIDTH / 2.0) / SCALE, (WINDOW_HEIGHT - 80.0 - y) / SCALE)
}

fn window_conf() -> Conf {
    Conf {
        window_title: "impulse2d - Visual Demo".to_owned(),
        window_width: WINDOW_WIDTH as i32,
        window_height: WINDOW_HEIGHT as i32,
        ..Default::default()
    }
}

/// Builds the starting scene: a floor, two ramps, and a pile of shapes
fn build_scene() -> PhysicsWorld {
    let mut world = PhysicsWorld::new(
        WorldSettings::default()
            .with_gravity(15.0)
            .with_updates_per_frame(2)
            .with_collision_precision(6),
    );

    let platforms = [
        (0.0, 0.0, 24.0, 0.6, 0.0),
        (-6.0, 4.0, 6.0, 0.4, -0.3),
        (6.0, 4.0, 6.0, 0.4, 0.3),
        (0.0, 7.0, 5.0, 0.4, 0.0),
    ];
    for (x, y, w, h, angle) in platforms {
        if let Ok(handle) = world.add_box(x, y, w, h, Material::STATIC) {
            world.set_body_orientation(handle, angle);
        }
    }

    for i in 0..6 {
        let x = (i as f32 - 2.5) * 1.2;
        let radius = 0.3 + 0.05 * i as f32;
        if let Err(e) = world.add_circle(x, 12.0 + i as f32 * 0.6, radius, Material::BOUNCY) {
            eprintln!("skipping ball {i}: {e}");
        }
    }

    for i in 0..4 {
        let x = (i as f32 - 1.5) * 2.0;
        if let Err(e) = world.add_box(x, 15.0 + i as f32, 0.8, 0.8, Material::WOOD) {
            eprintln!("skipping crate {i}: {e}");
        }
    }

    for (sides, x) in [(3, -4.0), (5, 0.0), (6, 4.0)] {
        if let Ok(polygon) = Polygon::regular(sides, 0.6) {
            let points = polygon.local_points().to_vec();
            if let Err(e) = world.add_polygon(x, 18.0, points, Material::ROCK) {
                eprintln!("skipping {sides}-gon: {e}");
            }
        }
    }

    world
}

fn body_color(is_static: bool, index: usize) -> Color {
    const PALETTE: [Color; 6] = [RED, ORANGE, YELLOW, SKYBLUE, VIOLET, LIME];
    if is_static {
        Color::from_rgba(100, 100, 150, 255)
    } else {
        PALETTE[index % PALETTE.len()]
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut world = build_scene();
    let mut spawn_box = false;
    let mut show_contacts = true;
    let mut paused = false;
    let mut contacts: Vec<DebugShape> = Vec::new();

    loop {
        // Handle input
        if is_key_pressed(KeyCode::Space) {
            paused = !paused;
        }
        if is_key_pressed(KeyCode::Key1) {
            spawn_box = false;
        }
        if is_key_pressed(KeyCode::Key2) {
            spawn_box = true;
        }
        if is_key_pressed(KeyCode::D) {
            show_contacts = !show_contacts;
        }
        if is_key_pressed(KeyCode::R) {
            world = build_scene();
        }

        // Spawn on mouse click
        if is_mouse_button_pressed(MouseButton::Left) {
            let (mx, my) = mouse_position();
            let (px, py) = screen_to_physics(mx, my);
            let spawned = if spawn_box {
                world.add_box(px, py, 0.7, 0.7, Material::WOOD)
            } else {
                world.add_circle(px, py, 0.35, Material::BOUNCY)
            };
            if let Err(e) = spawned {
                eprintln!("spawn failed: {e}");
            }
        }

        if !paused {
            contacts.clear();
            world.advance_with(get_frame_time(), &mut contacts);
        }

        // === DRAWING ===
        clear_background(Color::from_rgba(25, 25, 35, 255));

        for (i, (_, body)) in world.bodies().enumerate() {
            let color = body_color(body.is_static(), i);
            match body.shape() {
                Shape::Circle(circle) => {
                    let (sx, sy) = physics_to_screen(body.position());
                    let r = circle.radius * SCALE;
                    draw_circle(sx, sy, r, color);
                    // Spoke to show rotation
                    let tip = body.position()
                        + impulse2d::math::Vec2::from_polar(circle.radius, body.orientation());
                    let (tx, ty) = physics_to_screen(tip);
                    draw_line(sx, sy, tx, ty, 2.0, Color::from_rgba(50, 50, 50, 255));
                }
                Shape::Polygon(polygon) => {
                    let points: Vec<(f32, f32)> =
                        polygon.world_points().iter().map(|&p| physics_to_screen(p)).collect();
                    let (cx, cy) = physics_to_screen(body.position());
                    for (j, &(ax, ay)) in points.iter().enumerate() {
                        let (bx, by) = points[(j + 1) % points.len()];
                        draw_triangle(
                            macroquad::math::Vec2::new(cx, cy),
                            macroquad::math::Vec2::new(ax, ay),
                            macroquad::math::Vec2::new(bx, by),
                            color,
                        );
                        draw_line(ax, ay, bx, by, 2.0, WHITE);
                    }
                }
            }
        }

        if show_contacts {
            for shape in &contacts {
                match *shape {
                    DebugShape::Point { at } => {
                        let (sx, sy) = physics_to_screen(at);
                        draw_circle(sx, sy, 3.0, GREEN);
                    }
                    DebugShape::Vector { origin, vector } => {
                        let (sx, sy) = physics_to_screen(origin);
                        let (ex, ey) = physics_to_screen(origin + vector * 0.5);
                        draw_line(sx, sy, ex, ey, 1.5, GREEN);
                    }
                    DebugShape::Line { from, to } => {
                        let (ax, ay) = physics_to_screen(from);
                        let (bx, by) = physics_to_screen(to);
                        draw_line(ax, ay, bx, by, 1.0, GREEN);
                    }
                }
            }
        }

        // === UI ===
        draw_text("impulse2d Visual Demo", 10.0, 25.0, 28.0, WHITE);
        draw_text(&format!("Bodies: {}", world.num_bodies()), 10.0, 50.0, 20.0, LIGHTGRAY);
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 70.0, 20.0, LIGHTGRAY);
        draw_text(
            &format!("Contacts: {}", world.collisions().len()),
            10.0,
            90.0,
            20.0,
            LIGHTGRAY,
        );
        let mode_text = if spawn_box { "Spawn: [2] BOX" } else { "Spawn: [1] BALL" };
        draw_text(mode_text, 10.0, 115.0, 20.0, GOLD);

        if paused {
            draw_text("PAUSED", WINDOW_WIDTH / 2.0 - 60.0, 35.0, 36.0, YELLOW);
        }

        draw_text(
            "Controls: [Space] Pause | [R] Reset | [1/2] Shape | [D] Contacts | [Click] Spawn",
            10.0,
            WINDOW_HEIGHT - 10.0,
            16.0,
            GRAY,
        );

        next_frame().await
    }
}
