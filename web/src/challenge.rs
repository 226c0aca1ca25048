use crate::utils::*;
use gridlock_core::{
    Capture, ChallengeConfig, ChallengeError, ChallengeRenderer, ChallengeSession, ChallengeView,
    Glyph, GridLayout, Point, RandomChallengeGenerator, Rect, Shape, Size, SubmitOutcome, Surface,
};
use std::f64::consts::TAU;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

/// Draws the captured frame, the grid overlay, glyphs and the selection highlight.
pub(crate) struct CanvasRenderer<'a> {
    ctx: CanvasRenderingContext2d,
    image: &'a HtmlCanvasElement,
}

impl<'a> CanvasRenderer<'a> {
    pub(crate) fn new(canvas: &HtmlCanvasElement, image: &'a HtmlCanvasElement) -> anyhow::Result<Self> {
        canvas.set_width(image.width());
        canvas.set_height(image.height());
        Ok(Self {
            ctx: context_2d(canvas)?,
            image,
        })
    }

    fn draw_glyph(&self, glyph: Glyph, center: Point, size: f64, tinted: bool) -> anyhow::Result<()> {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(glyph_fill(glyph, tinted));
        ctx.begin_path();
        match glyph.shape {
            Shape::Triangle => {
                ctx.move_to(center.x, center.y - size);
                ctx.line_to(center.x - size, center.y + size);
                ctx.line_to(center.x + size, center.y + size);
                ctx.close_path();
                ctx.fill();
            }
            Shape::Square => {
                ctx.fill_rect(center.x - size, center.y - size, size * 2.0, size * 2.0);
            }
            Shape::Circle => {
                ctx.arc(center.x, center.y, size, 0.0, TAU).map_err(js_err)?;
                ctx.fill();
            }
        }
        Ok(())
    }
}

impl ChallengeRenderer for CanvasRenderer<'_> {
    type Error = anyhow::Error;

    fn render(&mut self, layout: &GridLayout, view: ChallengeView<'_>) -> anyhow::Result<()> {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.image.width().into(), self.image.height().into());
        ctx.draw_image_with_html_canvas_element(self.image, 0.0, 0.0)
            .map_err(js_err)?;

        ctx.set_stroke_style_str(GRID_STROKE);
        ctx.set_line_width(1.0);
        for line in layout.lines() {
            ctx.begin_path();
            ctx.move_to(line.from.x, line.from.y);
            ctx.line_to(line.to.x, line.to.y);
            ctx.stroke();
        }

        let tinted = view.target.tint.is_some();
        let radius = layout.glyph_radius();
        for (index, cell) in view.grid.iter() {
            let (Some(glyph), Some(center)) = (cell.glyph(), layout.cell_center(index)) else {
                continue;
            };
            self.draw_glyph(glyph, center, radius, tinted)?;
        }

        ctx.set_fill_style_str(SELECTION_FILL);
        for rect in view.selection.iter().filter_map(|index| layout.cell_rect(index)) {
            ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
        }
        Ok(())
    }
}

/// Measures where the canvas sits on the page against its intrinsic pixel size.
fn surface_of(canvas: &HtmlCanvasElement) -> Surface {
    let bounds = canvas.get_bounding_client_rect();
    Surface::new(
        Rect::new(bounds.left(), bounds.top(), bounds.width(), bounds.height()),
        Size::new(canvas.width().into(), canvas.height().into()),
    )
}

pub(crate) enum Msg {
    Click(Point),
    Validate,
}

#[derive(Properties, PartialEq)]
pub(crate) struct ChallengeProps {
    pub capture: Capture<HtmlCanvasElement>,
    pub config: ChallengeConfig,
    pub seed: u64,
    pub on_finish: Callback<bool>,
}

pub(crate) struct ChallengeBoard {
    session: Result<ChallengeSession, ChallengeError>,
    canvas_ref: NodeRef,
    notice: Option<String>,
}

impl ChallengeBoard {
    fn on_submit(&mut self, ctx: &Context<Self>) -> bool {
        let Ok(session) = &mut self.session else {
            return false;
        };
        match session.submit() {
            Ok(SubmitOutcome::Retry { attempts_left }) => {
                log::debug!("wrong selection, {} attempts left", attempts_left);
                self.notice = Some(SubmitOutcome::Retry { attempts_left }.to_string());
                true
            }
            Ok(outcome) => {
                log::debug!("challenge finished: {:?}", outcome);
                if let Some(passed) = session.state().verdict() {
                    ctx.props().on_finish.emit(passed);
                }
                false
            }
            Err(err) => {
                log::error!("submit rejected: {}", err);
                if let Some(passed) = session.state().verdict() {
                    ctx.props().on_finish.emit(passed);
                }
                false
            }
        }
    }
}

impl Component for ChallengeBoard {
    type Message = Msg;
    type Properties = ChallengeProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let generator = RandomChallengeGenerator::from_seed(props.seed);
        let session = ChallengeSession::new(props.config.clone(), generator);
        if let Err(err) = &session {
            log::error!("could not start challenge: {}", err);
        }
        Self {
            session,
            canvas_ref: NodeRef::default(),
            notice: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Click(pointer) => {
                let (Ok(session), Some(canvas)) =
                    (&mut self.session, self.canvas_ref.cast::<HtmlCanvasElement>())
                else {
                    return false;
                };
                let surface = surface_of(&canvas);
                match session.click(pointer, &surface, ctx.props().capture.roi) {
                    Ok(outcome) => {
                        log::trace!("click: {:?}", outcome);
                        outcome.has_update()
                    }
                    Err(err) => {
                        log::error!("click rejected: {}", err);
                        false
                    }
                }
            }
            Msg::Validate => self.on_submit(ctx),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let session = match &self.session {
            Ok(session) => session,
            Err(err) => {
                return html! {
                    <div class="challenge">
                        <p class="error">{format!("Challenge unavailable: {}", err)}</p>
                    </div>
                };
            }
        };

        let on_click = ctx.link().batch_callback(|e: MouseEvent| {
            (e.button() == 0).then(|| Msg::Click(Point::new(e.client_x().into(), e.client_y().into())))
        });
        let on_validate = ctx.link().callback(|_: MouseEvent| Msg::Validate);

        html! {
            <div class="challenge">
                <h3>{session.prompt()}</h3>
                <canvas ref={self.canvas_ref.clone()} class="grid" onclick={on_click}/>
                if let Some(notice) = &self.notice {
                    <p class="notice">{notice}</p>
                }
                <button onclick={on_validate}>{"Validate"}</button>
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        let (Ok(session), Some(canvas)) = (&self.session, self.canvas_ref.cast::<HtmlCanvasElement>())
        else {
            return;
        };
        let capture = &ctx.props().capture;
        let layout = GridLayout::new(capture.roi, session.config().size);
        let result = CanvasRenderer::new(&canvas, &capture.image)
            .and_then(|mut renderer| renderer.render(&layout, session.view()));
        if let Err(err) = result {
            log::error!("failed to draw challenge: {:#}", err);
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn new_canvas(width: u32, height: u32) -> HtmlCanvasElement {
        let canvas = gloo::utils::document()
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();
        canvas.set_width(width);
        canvas.set_height(height);
        canvas
    }

    #[wasm_bindgen_test]
    fn seeded_session_renders_onto_canvas() {
        let image = new_canvas(640, 480);
        let target = new_canvas(1, 1);
        let mut session =
            ChallengeSession::new(ChallengeConfig::default(), RandomChallengeGenerator::from_seed(7))
                .unwrap();
        session.toggle(5).unwrap();
        let layout = GridLayout::new(Rect::new(140.0, 120.0, 180.0, 180.0), session.config().size);

        let mut renderer = CanvasRenderer::new(&target, &image).unwrap();
        renderer.render(&layout, session.view()).unwrap();

        assert_eq!((target.width(), target.height()), (640, 480));
    }
}
