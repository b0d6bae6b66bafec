use futures::future::LocalBoxFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use winter_core::error::LoadError;
use winter_core::game_registry::GameId;
use winter_core::module::{BoxedModule, ModuleSource};

use crate::catalog;
use crate::runner::PlayableModule;
use crate::surface::CanvasSurface;

/// Fetches `<base>/<game>.toml` and builds the game from it.
pub struct AssetModuleSource {
    base: String,
}

impl AssetModuleSource {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn tuning_url(&self, game: GameId) -> String {
        format!("{}/{}.toml", self.base.trim_end_matches('/'), game)
    }
}

impl ModuleSource<CanvasSurface> for AssetModuleSource {
    fn fetch(&self, game: GameId) -> LocalBoxFuture<'_, Result<BoxedModule<CanvasSurface>, LoadError>> {
        let url = self.tuning_url(game);
        Box::pin(async move {
            let tuning = fetch_text(&url)
                .await
                .map_err(|reason| LoadError::fetch(game, format!("{url}: {reason}")))?;
            let instance = catalog::build_game(game, &tuning, random_seed())?;
            let module: BoxedModule<CanvasSurface> = Box::new(PlayableModule::new(game, instance));
            Ok(module)
        })
    }
}

async fn fetch_text(url: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or("No window")?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("fetch failed: {e:?}"))?
        .dyn_into::<Response>()
        .map_err(|_| "Not a Response")?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    let body = response
        .text()
        .map_err(|e| format!("body unreadable: {e:?}"))?;
    JsFuture::from(body)
        .await
        .map_err(|e| format!("body unreadable: {e:?}"))?
        .as_string()
        .ok_or_else(|| "body is not text".to_string())
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}
