use crate::camera::CameraView;
use crate::challenge::ChallengeBoard;
use crate::utils::*;
use gridlock_core::{Capture, ChallengeConfig};
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

/// Valid transitions:
/// - Capture -> Challenge
/// - Challenge -> Verdict
/// - Verdict -> Capture (fresh episode)
#[derive(Clone, Debug, PartialEq)]
enum Step {
    Capture,
    Challenge(Capture<HtmlCanvasElement>),
    Verdict(bool),
}

pub(crate) enum Msg {
    Captured(Capture<HtmlCanvasElement>),
    Finished(bool),
    TryAgain,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct AppProps {
    pub config: ChallengeConfig,
    /// Force a seed instead of random
    pub seed: Option<u64>,
}

pub(crate) struct App {
    step: Step,
    episode: u32,
}

impl Component for App {
    type Message = Msg;
    type Properties = AppProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            step: Step::Capture,
            episode: 0,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Captured(capture) => {
                log::debug!("episode {}: frame captured", self.episode);
                self.step = Step::Challenge(capture);
            }
            Msg::Finished(passed) => {
                log::info!("episode {}: {}", self.episode, if passed { "passed" } else { "failed" });
                self.step = Step::Verdict(passed);
            }
            Msg::TryAgain => {
                self.episode = self.episode.wrapping_add(1);
                self.step = Step::Capture;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.step {
            Step::Capture => {
                let on_capture = ctx.link().callback(Msg::Captured);
                html! { <CameraView {on_capture}/> }
            }
            Step::Challenge(capture) => {
                let props = ctx.props();
                let on_finish = ctx.link().callback(Msg::Finished);
                html! {
                    <ChallengeBoard
                        key={self.episode}
                        capture={capture.clone()}
                        config={props.config.clone()}
                        seed={episode_seed(props.seed, self.episode)}
                        {on_finish}
                    />
                }
            }
            Step::Verdict(passed) => {
                let on_try_again = ctx.link().callback(|_: MouseEvent| Msg::TryAgain);
                html! {
                    <div class="verdict">
                        <h2>{if *passed { "Passed CAPTCHA!" } else { "Failed CAPTCHA" }}</h2>
                        <button onclick={on_try_again}>{"Try again"}</button>
                    </div>
                }
            }
        }
    }
}
