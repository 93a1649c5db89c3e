use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use plexus_field::render::Renderer;
use plexus_field::{scene, FieldConfig, ParticleField};

// The simulation is per-frame with a 60Hz assumption baked into its
// velocities, so the loop is paced to match rather than delta-scaled.
const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("failed to create event loop: {e}");
            return;
        }
    };
    let window = match WindowBuilder::new()
        .with_title("Plexus Field")
        .build(&event_loop)
    {
        Ok(window) => Arc::new(window),
        Err(e) => {
            tracing::error!("failed to create window: {e}");
            return;
        }
    };

    // Decorative layer: if the surface is unavailable, render nothing
    // instead of faulting.
    let mut renderer = match Renderer::new(window.clone()) {
        Ok(renderer) => renderer,
        Err(e) => {
            tracing::error!("renderer unavailable, nothing to draw: {e}");
            return;
        }
    };

    let size = window.inner_size();
    let mut field = ParticleField::new(size.width as f32, size.height as f32, FieldConfig::default());
    tracing::info!(ambient = field.ambient_count(), "particle field initialized");

    let mut last_frame_time = Instant::now();
    let result = event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    field.teardown();
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                    field.resize(physical_size.width as f32, physical_size.height as f32);
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = window.inner_size();
                    renderer.resize(size);
                    field.resize(size.width as f32, size.height as f32);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    field.pointer_moved(position.x as f32, position.y as f32, Instant::now());
                }
                WindowEvent::RedrawRequested => {
                    field.tick_bursts(Instant::now());
                    field.advance();
                    let scene = scene::build(field.particles(), field.config());
                    match renderer.render(&scene) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            tracing::warn!("surface lost, reconfiguring");
                            renderer.reconfigure();
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            tracing::error!("out of graphics memory, exiting");
                            field.teardown();
                            elwt.exit();
                        }
                        Err(e) => {
                            tracing::warn!("surface error: {e:?}");
                        }
                    }
                    thread::sleep(FRAME_INTERVAL.saturating_sub(last_frame_time.elapsed()));
                    last_frame_time = Instant::now();
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        }
    });
    if let Err(e) = result {
        tracing::error!("event loop error: {e}");
    }
}
