use rust_embed::Embed;

/// Public static files (stylesheet, logo). Never behind the guard.
#[derive(Embed)]
#[folder = "web/public/"]
pub struct PublicAssets;

/// HTML page templates.
#[derive(Embed)]
#[folder = "web/templates/"]
pub struct Templates;
