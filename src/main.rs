#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_files::Files;
    use actix_web::*;
    use leptos::*;
    use leptos::logging::log;
    use leptos_actix::{generate_route_list, LeptosRoutes};
    use seatrate::api;
    use seatrate::app::App as SeatrateApp;
    use seatrate::config::Config;
    use seatrate::db::{load_seed_file, Database};

    fn to_io(err: impl std::fmt::Display) -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
    }

    let config = Config::from_env();

    // Initialize the database
    let db = Database::new(&config.db_path).map_err(to_io)?;
    db.create_schema().await.map_err(to_io)?;
    log!("[SERVER] Schema ready in {}", config.db_path);

    if let Some(seed_path) = &config.seed_path {
        let seed = load_seed_file(seed_path).map_err(to_io)?;
        db.seed(&seed).await.map_err(to_io)?;
        log!(
            "[SEED] Loaded {} venues and {} artists from {}",
            seed.venues.len(),
            seed.artists.len(),
            seed_path.display()
        );
    }

    let conf = get_configuration(None).await.map_err(to_io)?;
    let addr = conf.leptos_options.site_addr;

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(SeatrateApp);
    log!("[SERVER] listening on http://{}", &addr);

    HttpServer::new(move || {
        let leptos_options = &conf.leptos_options;
        let site_root = &leptos_options.site_root;

        App::new()
            .app_data(web::Data::new(db.clone()))
            // JSON API before the Leptos routes
            .configure(api::configure)
            .service(Files::new("/pkg", format!("{site_root}/pkg")))
            .service(Files::new("/assets", site_root))
            .service(favicon)
            .leptos_routes(leptos_options.to_owned(), routes.to_owned(), SeatrateApp)
            .app_data(web::Data::new(leptos_options.to_owned()))
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(feature = "ssr")]
#[actix_web::get("favicon.ico")]
async fn favicon(
    leptos_options: actix_web::web::Data<leptos::LeptosOptions>,
) -> actix_web::Result<actix_files::NamedFile> {
    let leptos_options = leptos_options.into_inner();
    let site_root = &leptos_options.site_root;
    Ok(actix_files::NamedFile::open(format!(
        "{site_root}/favicon.ico"
    ))?)
}

#[cfg(not(any(feature = "ssr", feature = "csr")))]
pub fn main() {
    // no client-side main function; see lib.rs for hydration
}

#[cfg(all(not(feature = "ssr"), feature = "csr"))]
pub fn main() {
    // client-only build for `trunk serve --open --features csr`
    use seatrate::app::*;

    console_error_panic_hook::set_once();

    leptos::mount_to_body(App);
}
