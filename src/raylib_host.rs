use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use log::{debug, warn};
use raylib::prelude::*;

use crate::constants::FPS;
use crate::error::WatchError;
use crate::geometry::{FaceLayout, Rect, Size, TextAlign};
use crate::host::{
    AnimationCompleted, AnimationRequest, Animator, Bitmap, Curve, LayerTree, NodeId, ResourceService, TextField,
    TextSink,
};
use crate::selector::ImageId;
use crate::texture_loader::load_image_for_width;

const TIME_FONT_SIZE: i32 = 28;
const SIDE_FONT_SIZE: i32 = 18;

struct Slide {
    request: AnimationRequest,
    tween: ease::Tween,
    elapsed: f32,
    duration: f32,
}

/// Desktop stand-in for the watch: a window showing the face scaled up.
pub struct RaylibHost {
    framebuffer: RenderTexture2D,
    layout: FaceLayout,

    image_paths: Vec<PathBuf>,
    textures: HashMap<u32, Texture2D>,
    next_handle: u32,

    // children of the image root, bottom first
    stack: Vec<NodeId>,
    frames: HashMap<NodeId, Rect>,
    bound: HashMap<NodeId, u32>,

    slides: Vec<Slide>,
    completed: Vec<AnimationCompleted>,

    texts: HashMap<TextField, String>,

    // dropped last: textures must be unloaded before the window closes
    rl: RaylibHandle,
    thread: RaylibThread,
}

impl RaylibHost {
    /// `image_paths[n - 1]` backs `ImageId(n)`.
    pub fn new(image_paths: Vec<PathBuf>, layout: FaceLayout, scale: i32) -> Result<Self> {
        let width = layout.screen.w as i32;
        let height = layout.screen.h as i32;

        let (mut rl, thread) = raylib::init()
            .size(width * scale, height * scale)
            .title("Photo Watch")
            .vsync()
            .resizable()
            .build();
        rl.set_target_fps(FPS);
        rl.set_trace_log(TraceLogLevel::LOG_ERROR);

        let framebuffer = rl
            .load_render_texture(&thread, width as u32, height as u32)
            .map_err(|e| anyhow!("Failed to create render texture: {}", e))?;

        Ok(Self {
            rl,
            thread,
            framebuffer,
            layout,
            image_paths,
            textures: HashMap::new(),
            next_handle: 1,
            stack: Vec::new(),
            frames: HashMap::new(),
            bound: HashMap::new(),
            slides: Vec::new(),
            completed: Vec::new(),
            texts: HashMap::new(),
        })
    }

    pub fn window_should_close(&self) -> bool {
        self.rl.window_should_close()
    }

    pub fn frame_time(&self) -> f32 {
        self.rl.get_frame_time()
    }

    /// Advances running slides by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        for slide in self.slides.iter_mut() {
            slide.elapsed += dt;
            let x = slide.tween.apply(dt);
            let frame = self.frames.entry(slide.request.node).or_insert(slide.request.from);
            frame.origin.x = x.round() as i16;
        }

        let (done, running): (Vec<Slide>, Vec<Slide>) =
            self.slides.drain(..).partition(|slide| slide.elapsed >= slide.duration);
        self.slides = running;
        for slide in done {
            self.frames.insert(slide.request.node, slide.request.to);
            self.completed.push(slide.request.completed(true));
        }
    }

    /// Completion events produced since the last call, oldest first.
    pub fn drain_completed(&mut self) -> Vec<AnimationCompleted> {
        std::mem::take(&mut self.completed)
    }

    pub fn render(&mut self) {
        let layout = self.layout;
        let region = layout.image_region;

        self.rl.draw_texture_mode(&self.thread, &mut self.framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(&self.thread);
            d.clear_background(Color::BLACK);

            for node in self.stack.iter() {
                let (Some(handle), Some(frame)) = (self.bound.get(node), self.frames.get(node)) else {
                    continue;
                };
                let Some(texture) = self.textures.get(handle) else {
                    continue;
                };
                // height may be clamped: draw only the top part of the texture
                d.draw_texture_pro(
                    texture,
                    Rectangle::new(0.0, 0.0, frame.size.w as f32, frame.size.h as f32),
                    Rectangle::new(
                        (region.origin.x + frame.origin.x) as f32,
                        (region.origin.y + frame.origin.y) as f32,
                        frame.size.w as f32,
                        frame.size.h as f32,
                    ),
                    Vector2::new(0.0, 0.0),
                    0.0,
                    Color::WHITE,
                );
            }

            let band = layout.text_band;
            d.draw_rectangle(
                band.origin.x as i32,
                band.origin.y as i32,
                band.size.w as i32,
                band.size.h as i32,
                Color::BLACK,
            );

            let fields = [
                (TextField::Time, layout.time_field, TextAlign::Center, TIME_FONT_SIZE),
                (TextField::Date, layout.date_field, TextAlign::Right, SIDE_FONT_SIZE),
                (TextField::Day, layout.day_field, TextAlign::Right, SIDE_FONT_SIZE),
            ];
            for (field, rect, align, size) in fields {
                let Some(text) = self.texts.get(&field) else {
                    continue;
                };
                let text_w = measure_text(text, size);
                let x = match align {
                    TextAlign::Center => rect.origin.x as i32 + (rect.size.w as i32 - text_w) / 2,
                    TextAlign::Right => rect.origin.x as i32 + rect.size.w as i32 - text_w,
                };
                d.draw_text(text, x, rect.origin.y as i32, size, Color::WHITE);
            }
        });

        let mut d = self.rl.begin_drawing(&self.thread);
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;

        // render textures are stored upside down
        d.draw_texture_pro(
            &self.framebuffer,
            Rectangle::new(0.0, 0.0, self.framebuffer.width() as f32, -(self.framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }
}

impl ResourceService for RaylibHost {
    fn materialize(&mut self, image: ImageId) -> Result<Bitmap, WatchError> {
        let unavailable = WatchError::ResourceUnavailable { image };
        let path = (image.0 as usize)
            .checked_sub(1)
            .and_then(|i| self.image_paths.get(i))
            .ok_or_else(|| unavailable.clone())?;

        let decoded = load_image_for_width(path, self.layout.image_region.size.w as i32).map_err(|e| {
            warn!("{:#}", e);
            unavailable.clone()
        })?;
        let texture = self.rl.load_texture_from_image(&self.thread, &decoded).map_err(|e| {
            warn!("Failed to create texture for {}: {}", path.display(), e);
            unavailable.clone()
        })?;

        let size = Size::from_pixels(texture.width(), texture.height()).ok_or_else(|| {
            warn!("{} is {}x{}, too large for the face", path.display(), texture.width(), texture.height());
            unavailable.clone()
        })?;
        let handle = self.next_handle;
        self.next_handle += 1;
        self.textures.insert(handle, texture);
        debug!("Materialized {} from {} as handle {}", image, path.display(), handle);

        Ok(Bitmap { image, handle, size })
    }

    fn free(&mut self, bitmap: Bitmap) {
        // dropping the texture unloads it from the GPU
        self.textures.remove(&bitmap.handle);
    }
}

impl LayerTree for RaylibHost {
    fn bind(&mut self, node: NodeId, bitmap: Option<&Bitmap>) {
        match bitmap {
            Some(bitmap) => self.bound.insert(node, bitmap.handle),
            None => self.bound.remove(&node),
        };
    }

    fn attach(&mut self, node: NodeId, _parent: NodeId) {
        self.stack.retain(|n| *n != node);
        self.stack.push(node);
    }

    fn insert_below(&mut self, node: NodeId, sibling: NodeId) {
        self.stack.retain(|n| *n != node);
        let at = self.stack.iter().position(|n| *n == sibling).unwrap_or(0);
        self.stack.insert(at, node);
    }

    fn detach(&mut self, node: NodeId) {
        self.stack.retain(|n| *n != node);

        // a node pulled out mid-slide still reports, as unfinished
        let (cut, running): (Vec<Slide>, Vec<Slide>) =
            self.slides.drain(..).partition(|slide| slide.request.node == node);
        self.slides = running;
        self.completed.extend(cut.into_iter().map(|slide| slide.request.completed(false)));
    }

    fn set_frame(&mut self, node: NodeId, frame: Rect) {
        self.frames.insert(node, frame);
    }
}

impl Animator for RaylibHost {
    fn start_animation(&mut self, request: AnimationRequest) {
        let easer: fn(f32, f32, f32, f32) -> f32 = match request.curve {
            Curve::EaseOut => ease::cubic_out,
        };
        let duration = request.duration_ms as f32 / 1000.0;
        self.frames.insert(request.node, request.from);
        self.slides.push(Slide {
            request,
            tween: ease::Tween::new(easer, request.from.origin.x as f32, request.to.origin.x as f32, duration),
            elapsed: 0.0,
            duration,
        });
    }
}

impl TextSink for RaylibHost {
    fn set_text(&mut self, field: TextField, text: &str) {
        self.texts.insert(field, text.trim_end().to_string());
    }
}
