use anyhow::{Context, Result};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use graph2_engine::coords::{ColorRgba, Transform2, Vec2};
use graph2_engine::core::{App, AppControl, FrameCtx};
use graph2_engine::device::GpuInit;
use graph2_engine::graph::{
    Graphic, Handle, LineGraphic, Point, Rect, RectGraphic, RegistryConfig, Scene,
    TriangleGraphic,
};
use graph2_engine::logging::{init_logging, LoggingConfig};
use graph2_engine::render::GraphicsBatch;
use graph2_engine::window::{Runtime, RuntimeConfig};

/// Radians per second for the shared spin.
const SPIN_RATE: f32 = 0.8;

/// Demo frame loop: every graphic follows one config-only anchor.
///
/// Fields drop in declaration order, so dependents are released before the anchor.
struct Sandbox<'s> {
    scene: &'s Scene,
    triangles: Vec<TriangleGraphic<'s>>,
    rects: Vec<RectGraphic<'s>>,
    wave: LineGraphic<'s>,
    anchor: Graphic<'s>,
    batch: GraphicsBatch,
}

impl<'s> Sandbox<'s> {
    fn build(scene: &'s Scene) -> Result<Self> {
        let anchor = scene.graphic().context("anchor graphic")?;
        let triangles = scene.create_triangle_group(3).context("triangle group")?;
        let rects = scene.create_rect_group(2).context("rect group")?;
        let wave = scene.line().context("wave line")?;

        let palette = [
            ColorRgba::red(),
            ColorRgba::from_rgba8(64, 200, 96, 255),
            ColorRgba::from_rgba8(48, 96, 230, 255),
        ];
        for (i, (triangle, color)) in triangles.iter().zip(palette).enumerate() {
            {
                let mut t = triangle.triangle()?;
                t.set_positions([
                    Vec2::new(0.0, -60.0),
                    Vec2::new(52.0, 30.0),
                    Vec2::new(-52.0, 30.0),
                ]);
                t.set_color(color);
            }
            let mut config = triangle.config()?;
            config.transform = Transform2::translate(Vec2::new(320.0 + 320.0 * i as f32, 220.0));
            config.layer = 2;
        }

        for (i, rect) in rects.iter().enumerate() {
            let tint = if i == 0 { ColorRgba::white() } else { ColorRgba::black() };
            *rect.rect()? =
                Rect::from_origin_size(Vec2::new(-90.0, -40.0), Vec2::new(180.0, 80.0), tint);
            let mut config = rect.config()?;
            config.transform = Transform2::translate(Vec2::new(420.0 + 440.0 * i as f32, 480.0));
            config.layer = 1;
        }

        {
            let mut line = wave.line()?;
            line.set_thickness(4.0);
            for step in 0..=48 {
                let x = step as f32 * 20.0 - 480.0;
                let y = (step as f32 * 0.4).sin() * 40.0;
                line.push(Point::new(Vec2::new(x, y), ColorRgba::white()));
            }
            drop(line);

            let mut config = wave.config()?;
            config.transform = Transform2::translate(Vec2::new(640.0, 620.0));
            config.color_multiplier = ColorRgba::new(1.0, 1.0, 0.4, 1.0);
        }

        let dependents = triangles
            .iter()
            .map(|t| &**t)
            .chain(rects.iter().map(|r| &**r))
            .chain(core::iter::once(&*wave));
        for graphic in dependents {
            graphic.attach_config(&anchor)?;
        }

        log::info!(
            "sandbox ready: {} live graphics",
            scene.registry().live_count()
        );

        Ok(Self {
            scene,
            triangles,
            rects,
            wave,
            anchor,
            batch: GraphicsBatch::new(),
        })
    }

    /// Draw order; the anchor has no geometry and is skipped by the dispatcher.
    fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        core::iter::once(self.anchor.handle())
            .chain(self.rects.iter().map(|r| r.handle()))
            .chain(self.triangles.iter().map(|t| t.handle()))
            .chain(core::iter::once(self.wave.handle()))
    }
}

impl App for Sandbox<'_> {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                log::info!("escape pressed");
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        match self.anchor.config() {
            Ok(mut config) => {
                config.transform = Transform2::rotate(ctx.time.elapsed * SPIN_RATE);
                let pulse = 0.75 + 0.25 * (ctx.time.elapsed * 2.0).sin();
                config.color_multiplier = ColorRgba::new(pulse, pulse, pulse, 1.0);
            }
            Err(err) => {
                log::error!("anchor config unavailable: {err}");
                return AppControl::Exit;
            }
        }

        self.batch.clear();
        let report = match self.scene.draw_all(self.handles().collect::<Vec<_>>(), &mut self.batch) {
            Ok(report) => report,
            Err(err) => {
                log::error!("frame {} not drawn: {err}", ctx.time.frame_index);
                return AppControl::Continue;
            }
        };
        if !report.is_clean() {
            log::warn!("{} stale handle(s) in frame {}", report.stale.len(), ctx.time.frame_index);
        }

        ctx.render(&mut self.batch)
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let scene = Scene::new(RegistryConfig::default());
    let mut sandbox = Sandbox::build(&scene)?;

    let config = RuntimeConfig {
        title: "graph2 sandbox".to_string(),
        ..RuntimeConfig::default()
    };
    Runtime::run(config, GpuInit::default(), &mut sandbox)?;

    drop(sandbox);
    log::info!("shutdown: {} live graphics", scene.registry().live_count());
    Ok(())
}
