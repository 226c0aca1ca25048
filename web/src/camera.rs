use crate::utils::*;
use anyhow::{Context as _, anyhow, bail};
use gloo::timers::callback::Interval;
use gridlock_core::{Capture, CaptureSource, FrameBox, Size};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlCanvasElement, HtmlVideoElement, MediaStream, MediaStreamConstraints};
use yew::prelude::*;

/// How often the capture frame jumps to a new spot.
const ROAM_INTERVAL_MS: u32 = 1000;

/// Live preview plus the roaming frame, captured on demand.
pub(crate) struct CameraFeed<'a> {
    video: &'a HtmlVideoElement,
    frame: FrameBox,
}

impl<'a> CameraFeed<'a> {
    pub(crate) fn new(video: &'a HtmlVideoElement, frame: FrameBox) -> Self {
        Self { video, frame }
    }
}

impl CaptureSource for CameraFeed<'_> {
    type Image = HtmlCanvasElement;
    type Error = anyhow::Error;

    fn capture(&mut self) -> anyhow::Result<Capture<HtmlCanvasElement>> {
        let (width, height) = (self.video.video_width(), self.video.video_height());
        if width == 0 || height == 0 {
            bail!("camera has not produced a frame yet");
        }
        let image = Size::new(width.into(), height.into());
        let display = Size::new(
            self.video.client_width().into(),
            self.video.client_height().into(),
        );
        let roi = self
            .frame
            .to_image_space(display, image)
            .context("camera preview is not visible")?;

        let canvas = gloo::utils::document()
            .create_element("canvas")
            .map_err(js_err)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| anyhow!("created element is not a canvas"))?;
        canvas.set_width(width);
        canvas.set_height(height);
        context_2d(&canvas)?
            .draw_image_with_html_video_element_and_dw_and_dh(
                self.video,
                0.0,
                0.0,
                image.width,
                image.height,
            )
            .map_err(js_err)?;

        log::debug!("captured {}x{} frame, roi: {:?}", width, height, roi);
        Ok(Capture { image: canvas, roi })
    }
}

async fn open_camera() -> anyhow::Result<MediaStream> {
    let devices = gloo::utils::window()
        .navigator()
        .media_devices()
        .map_err(js_err)?;
    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(js_err)?;
    JsFuture::from(promise)
        .await
        .map_err(js_err)?
        .dyn_into::<MediaStream>()
        .map_err(js_err)
}

fn stop_stream(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web_sys::MediaStreamTrack>() {
            track.stop();
        }
    }
}

pub(crate) enum Msg {
    StreamReady(MediaStream),
    StreamFailed(String),
    Roam,
    Capture,
}

#[derive(Properties, PartialEq)]
pub(crate) struct CameraProps {
    pub on_capture: Callback<Capture<HtmlCanvasElement>>,
}

pub(crate) struct CameraView {
    video_ref: NodeRef,
    stream: Option<MediaStream>,
    error: Option<String>,
    frame: FrameBox,
    rng: SmallRng,
    _roam_interval: Interval,
}

impl Component for CameraView {
    type Message = Msg;
    type Properties = CameraProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        wasm_bindgen_futures::spawn_local(async move {
            match open_camera().await {
                Ok(stream) => link.send_message(Msg::StreamReady(stream)),
                Err(err) => link.send_message(Msg::StreamFailed(format!("{:#}", err))),
            }
        });

        let link = ctx.link().clone();
        Self {
            video_ref: NodeRef::default(),
            stream: None,
            error: None,
            frame: FrameBox::default(),
            rng: SmallRng::seed_from_u64(js_random_seed()),
            _roam_interval: Interval::new(ROAM_INTERVAL_MS, move || link.send_message(Msg::Roam)),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::StreamReady(stream) => {
                if let Some(video) = self.video_ref.cast::<HtmlVideoElement>() {
                    video.set_src_object(Some(&stream));
                }
                self.stream = Some(stream);
                false
            }
            Msg::StreamFailed(err) => {
                log::error!("failed to open camera: {}", err);
                self.error = Some(err);
                true
            }
            Msg::Roam => {
                self.frame = FrameBox::roam(&mut self.rng);
                true
            }
            Msg::Capture => {
                let Some(video) = self.video_ref.cast::<HtmlVideoElement>() else {
                    return false;
                };
                match CameraFeed::new(&video, self.frame).capture() {
                    Ok(capture) => ctx.props().on_capture.emit(capture),
                    Err(err) => log::error!("capture failed: {:#}", err),
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let frame = self.frame.display_rect();
        let frame_style = format!(
            "left: {}px; top: {}px; width: {}px; height: {}px;",
            frame.x, frame.y, frame.width, frame.height
        );
        let on_capture = ctx.link().callback(|_: MouseEvent| Msg::Capture);

        html! {
            <div class="camera">
                <div class="preview">
                    <video ref={self.video_ref.clone()} autoplay={true} playsinline={true}/>
                    <div class="frame" style={frame_style}/>
                    <button onclick={on_capture}>{"Continue"}</button>
                </div>
                if let Some(err) = &self.error {
                    <p class="error">{format!("Camera unavailable: {}", err)}</p>
                }
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(stream) = self.stream.take() {
            stop_stream(&stream);
        }
    }
}
