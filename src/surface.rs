// Drawing boundary for the particle field. The browser canvas implements it
// directly; RecordingSurface captures calls so frames can be inspected.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

pub trait DrawingSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64);
    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2]);
    fn set_fill_color(&mut self, css: &str);
    fn set_stroke_color(&mut self, css: &str);
    fn set_line_width(&mut self, width: f64);
}

impl DrawingSurface for CanvasRenderingContext2d {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.begin_path();
        // arc only fails on a negative radius, which config validation rules out
        let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
        self.fill();
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2]) {
        self.begin_path();
        self.move_to(from[0], from[1]);
        self.line_to(to[0], to[1]);
        self.stroke();
    }

    fn set_fill_color(&mut self, css: &str) {
        self.set_fill_style_str(css);
    }

    fn set_stroke_color(&mut self, css: &str) {
        self.set_stroke_style_str(css);
    }

    fn set_line_width(&mut self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear { x: f64, y: f64, width: f64, height: f64 },
    Circle { x: f64, y: f64, radius: f64, fill: String },
    Line { from: [f64; 2], to: [f64; 2], stroke: String, width: f64 },
}

// Records draw calls with the style that was current when they were made
#[derive(Default, Debug)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    fill: String,
    stroke: String,
    line_width: f64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        RecordingSurface {
            line_width: 1.0,
            ..Default::default()
        }
    }

    pub fn clear_history(&mut self) {
        self.commands.clear();
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { x, y, width, height });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            fill: self.fill.clone(),
        });
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2]) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: self.stroke.clone(),
            width: self.line_width,
        });
    }

    fn set_fill_color(&mut self, css: &str) {
        self.fill = css.to_owned();
    }

    fn set_stroke_color(&mut self, css: &str) {
        self.stroke = css.to_owned();
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }
}
