// File: crates/report/src/viewer.rs
// Summary: Window that shows rendered figures via RGBA blit (CPU) using winit + softbuffer.
// Any key cycles to the next figure; closing the window exits.

use std::num::NonZeroU32;

use anyhow::{anyhow, Context, Result};
use silplot_core::Canvas;
use tracing::{debug, warn};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

pub fn show(canvases: Vec<Canvas>) -> Result<()> {
    let Some(first) = canvases.first() else {
        warn!("nothing to show");
        return Ok(());
    };

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(window_title(0, canvases.len()))
        .with_inner_size(winit::dpi::LogicalSize::new(first.width as f64, first.height as f64))
        .build(&event_loop)
        .context("build window")?;

    let context = unsafe { softbuffer::Context::new(&window) }
        .map_err(|e| anyhow!("softbuffer context: {e}"))?;
    let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }
        .map_err(|e| anyhow!("softbuffer surface: {e}"))?;

    let mut idx = 0usize;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::Resized(_) => window.request_redraw(),
                WindowEvent::KeyboardInput { input, .. } if input.state == ElementState::Pressed => {
                    idx = (idx + 1) % canvases.len();
                    debug!(figure = idx, "switch figure");
                    window.set_title(&window_title(idx, canvases.len()));
                    window.request_redraw();
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                let size = window.inner_size();
                if let Err(e) = present(&mut surface, &canvases[idx], size.width, size.height) {
                    warn!(error = %e, "skipping frame");
                }
            }
            _ => {}
        }
    })
}

fn window_title(idx: usize, total: usize) -> String {
    format!("silplot [{}/{}] (any key: next figure)", idx + 1, total)
}

fn present(surface: &mut softbuffer::Surface, canvas: &Canvas, width: u32, height: u32) -> Result<()> {
    let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
        // minimized
        return Ok(());
    };
    surface.resize(w, h).map_err(|e| anyhow!("resize: {e}"))?;

    let rgba = canvas.render_rgba8_sized(width as i32, height as i32)?;
    let mut frame = surface.buffer_mut().map_err(|e| anyhow!("frame: {e}"))?;
    for (dst, px) in frame.iter_mut().zip(rgba.chunks_exact(4)) {
        *dst = pack_xrgb(px[0], px[1], px[2]);
    }
    frame.present().map_err(|e| anyhow!("present: {e}"))?;
    Ok(())
}

/// Softbuffer pixel layout: 0x00RRGGBB.
fn pack_xrgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}
