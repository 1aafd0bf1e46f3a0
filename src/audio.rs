//! Background music collaborator
//!
//! Wraps the page's `<audio>` element. Playback is the only fallible
//! operation in the card: the browser may refuse play() until a user
//! gesture, and that refusal is reported back to the scene instead of being
//! surfaced as an error.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::JsFuture;
#[cfg(target_arch = "wasm32")]
use web_sys::{Document, HtmlAudioElement};

/// Handle to the ambient music element; absent element means music is
/// silently disabled for the session.
pub struct MusicPlayer {
    #[cfg(target_arch = "wasm32")]
    element: Option<HtmlAudioElement>,
}

#[cfg(target_arch = "wasm32")]
impl MusicPlayer {
    /// Look up the audio element by id; a missing or mistyped node
    /// disables music rather than failing init.
    pub fn from_document(document: &Document, id: &str) -> Self {
        let element = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
        if element.is_none() {
            log::warn!("audio element #{id} not found - music disabled");
        }
        Self { element }
    }

    /// Attempt playback. `on_refused` runs if the host rejects it (autoplay
    /// policy) so the caller can flip the scene's playing flag. The
    /// callback is always deferred to a later microtask; callers may hold
    /// scene borrows at the call site.
    pub fn play(&self, on_refused: impl FnOnce() + 'static) {
        let Some(element) = &self.element else { return };
        let attempt = element.play();
        wasm_bindgen_futures::spawn_local(async move {
            let refused = match attempt {
                Ok(promise) => JsFuture::from(promise).await.is_err(),
                Err(_) => true,
            };
            if refused {
                on_refused();
            }
        });
    }

    pub fn pause(&self) {
        if let Some(element) = &self.element {
            let _ = element.pause();
        }
    }
}

/// Native stubs (the card only plays music in the browser)
#[cfg(not(target_arch = "wasm32"))]
impl MusicPlayer {
    pub fn disabled() -> Self {
        Self {}
    }

    pub fn play(&self, _on_refused: impl FnOnce() + 'static) {}

    pub fn pause(&self) {}
}
