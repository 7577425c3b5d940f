use crate::errors::FetchError;
use crate::i18n::{Lang, Translations};
use crate::models::ProfileData;
use crate::state::{BadgeState, Profile, STEP_COUNT};

pub fn profile_url(slug: &str, lang: Lang) -> String {
    format!("https://thx.to/:{slug}/{}", lang.code())
}

pub fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders the badge container for the current state. `NotAsked` renders
/// nothing; the host keeps whatever was on screen before.
pub fn render_badge(state: &BadgeState) -> String {
    let t = state.lang.translations();
    match &state.profile {
        Profile::NotAsked => String::new(),
        Profile::Loading => render_loading(),
        Profile::Failed(error) => render_error(t, error),
        Profile::Loaded(data) => render_data(t, state.lang, state.step, data),
    }
}

/// Full standalone markup: stylesheet plus badge, ready to drop into a page.
pub fn render_document(state: &BadgeState) -> String {
    format!(
        "<style>{STYLES}</style>\n<div id=\"wrapper\">{}</div>",
        render_badge(state)
    )
}

fn render_loading() -> String {
    format!("<div class=\"container container--loading\">{SIGNET_SVG}</div>")
}

fn render_error(t: &Translations, error: &FetchError) -> String {
    let message = format!("{} - {}", t.error_headline, t.error_message(error.kind));
    let message = html_escape(&message);
    format!(
        "<div class=\"container container--error\" title=\"{message}\">\
         <div class=\"error\">{message}</div></div>"
    )
}

fn render_data(t: &Translations, lang: Lang, step: usize, data: &ProfileData) -> String {
    let href = html_escape(&profile_url(&data.user.slug, lang));
    let title = html_escape(&t.profile_link_title(&data.user.nickname));
    let steps: String = (0..STEP_COUNT)
        .map(|i| {
            let class = if i == step {
                "step step--current"
            } else {
                "step"
            };
            format!(
                "<div class=\"{class}\">{}</div>",
                render_step(t, i, data.thankus.collected, data.thankus.sent)
            )
        })
        .collect();
    format!(
        "<a href=\"{href}\" title=\"{title}\" class=\"container container--steps\">{steps}</a>"
    )
}

fn render_step(t: &Translations, step: usize, collected: u64, sent: u64) -> String {
    match step {
        3 => render_counter(collected, t.collected),
        2 => format!("<div class=\"content content--logo\">{LOGO_SVG}</div>"),
        1 => render_counter(sent, t.sent),
        _ => format!("<div class=\"content content--signet\">{SIGNET_SVG}</div>"),
    }
}

fn render_counter(value: u64, label: &str) -> String {
    format!(
        "<div class=\"content content--counter\">\
         <span class=\"counter-value\">{value}</span>\
         <span class=\"counter-label\">{}</span></div>",
        html_escape(label)
    )
}

pub const STYLES: &str = r#"
:host {
  --size: 100px;
  --color-darkblue: #202c55;
  --color-red: #e33429;
  --color-teal: #5fc2c5;
}
.container {
  align-items: center;
  background-color: var(--color-darkblue);
  border-radius: 50%;
  color: white;
  display: flex;
  font-family: "Exo", sans-serif;
  font-size: calc(var(--size) / 6.25); /* 16px at 100px size */
  height: var(--size);
  justify-content: center;
  line-height: 1.25;
  overflow: hidden;
  text-decoration: none;
  width: var(--size);
}
.container--error {
  background-color: var(--color-red);
  cursor: not-allowed;
}
.container--loading {
  cursor: wait;
}
.container--steps {
  position: relative;
}

.step {
  height: 100%;
  opacity: 0;
  position: absolute;
  transition: opacity 300ms;
  width: 100%;
  z-index: 1;
}
.step--current {
  opacity: 1;
  z-index: 2;
}

.content {
  align-items: center;
  display: flex;
  flex-direction: column;
  height: 100%;
  justify-content: center;
  width: 100%;
}
.content--counter {
  background-color: var(--color-teal);
}
.content--logo {
  background-color: white;
}
.content--signet {
  background-color: var(--color-darkblue);
}

.counter-value {
  color: white;
  font-size: 200%;
  line-height: 1;
  padding-top: 3%;
}
.counter-label {
  color: var(--color-darkblue);
  font-size: 80%;
  font-weight: 600;
  line-height: 1;
  padding-top: 3%;
}

.error {
  background-color: white;
  height: 0;
  overflow: hidden;
  padding-top: 16%;
  width: 72%;
}
"#;

pub const SIGNET_SVG: &str = r##"<svg viewBox="0 0 200 200" xmlns="http://www.w3.org/2000/svg" fill-rule="evenodd" clip-rule="evenodd" stroke-linejoin="round" stroke-miterlimit="2"><path d="M68.238 144.482H55.055c-8.824 0-15.988-7.164-15.988-15.988V73.45c0-8.824 7.164-15.988 15.988-15.988h89.89c8.824 0 15.988 7.164 15.988 15.988v55.044c0 8.824-7.164 15.988-15.988 15.988H87.44l-19.443 14.056.241-14.056z" fill="#54c1c8"/><path d="M100.056 89.509c6.458-9.263 19.373-9.263 25.831-4.631 6.458 4.631 6.458 13.894 0 23.157-4.52 6.947-16.144 13.894-25.831 18.525-9.686-4.631-21.31-11.578-25.831-18.525-6.457-9.263-6.457-18.526 0-23.157 6.458-4.632 19.373-4.632 25.831 4.631z" fill="#fff"/></svg>"##;

pub const LOGO_SVG: &str = r##"<svg viewBox="0 0 200 200" xmlns="http://www.w3.org/2000/svg" fill-rule="evenodd" clip-rule="evenodd" stroke-linejoin="round" stroke-miterlimit="2"><path d="M33.707 90.199H25v-5.705h23.806v5.705h-8.75v26.036h-6.349V90.199zm18.23-6.649h6.349v12.011c.858-.744 1.966-1.387 3.324-1.931 1.358-.543 2.695-.815 4.01-.815 4.719 0 7.078 2.731 7.078 8.193v15.227H66.35v-14.412c0-1.058-.301-1.873-.901-2.445-.601-.572-1.401-.858-2.402-.858-1.573 0-3.16.572-4.761 1.716v15.999h-6.349V83.55zm30.412 32.943c-1.773 0-3.195-.522-4.268-1.566-1.072-1.044-1.608-2.466-1.608-4.268V108.6c0-1.83.636-3.288 1.909-4.375 1.272-1.087 3.167-1.63 5.683-1.63h5.876v-1.587c0-.772-.128-1.38-.386-1.823-.257-.443-.743-.772-1.458-.987-.715-.214-1.773-.321-3.174-.321h-6.906v-3.689c2.831-.858 5.905-1.287 9.222-1.287 3.031 0 5.298.572 6.799 1.716 1.501 1.144 2.252 3.131 2.252 5.962v15.656h-5.019l-1.029-2.445c-.315.315-.872.687-1.673 1.116-.801.429-1.752.8-2.853 1.115a12.217 12.217 0 01-3.367.472zm3.303-4.418c.658 0 1.473-.15 2.445-.451.972-.3 1.587-.522 1.844-.665v-5.361l-3.86.257c-2.173.172-3.26 1.115-3.26 2.831v.944c0 1.63.944 2.445 2.831 2.445zm15.399-18.874h5.233l1.115 2.36c.944-.773 2.073-1.423 3.389-1.952 1.315-.529 2.602-.794 3.86-.794 2.603 0 4.447.744 5.534 2.231 1.086 1.487 1.63 3.488 1.63 6.005v15.184h-6.349v-14.369c0-1.087-.293-1.916-.879-2.488-.586-.572-1.394-.858-2.424-.858-1.572 0-3.159.572-4.761 1.716v15.999h-6.348V93.201zm25.522-9.694h6.348v17.673h2.703l5.061-7.979h6.434l-6.777 10.852 7.463 12.182h-6.434l-5.833-9.351h-2.617v9.351h-6.348V83.507z" fill="#202c55" fill-rule="nonzero"/><path d="M162.604 116.45c-3.975 0-7.035-.751-9.18-2.252-2.144-1.501-3.217-4.225-3.217-8.171V84.494h6.349v21.49c0 1.687.507 2.902 1.522 3.646 1.016.743 2.524 1.115 4.526 1.115 2.001 0 3.503-.372 4.504-1.115 1-.744 1.501-1.959 1.501-3.646v-21.49H175v21.533c0 3.946-1.08 6.67-3.238 8.171-2.16 1.501-5.212 2.252-9.158 2.252z" fill="#5fc2c5" fill-rule="nonzero"/></svg>"##;
