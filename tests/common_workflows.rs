//! Common workflows through the `polyroute` facade

use polyroute::prelude::*;

#[test]
fn test_declare_resolve_and_link_back() {
    let mut router = Router::new(RouterConfig::new().base_path("/blog")).unwrap();
    router
        .add(RouteBuilder::new(["GET"], "/post/(?<slug>[a-z-]+)", "Post:show").name("post"))
        .unwrap();
    router
        .add(
            RouteBuilder::new(["GET"], "/clanek/(?<slug>[a-z-]+)", "Post:show")
                .name("post")
                .lang("cs"),
        )
        .unwrap();

    let result = router
        .resolve(&RequestContext::new("GET", "/blog/post/hello-world/"))
        .unwrap()
        .into_matched()
        .unwrap();
    assert_eq!(result.status(), MatchStatus::Ok);
    assert_eq!(result.status().as_u16(), 200);

    let czech = result.uri(None, Some("cs")).unwrap();
    assert_eq!(czech.path(), "/blog/cs/clanek/hello-world/");
}

#[test]
fn test_redirect_workflow() {
    let mut router = Router::new(RouterConfig::default()).unwrap();
    router
        .add(RouteBuilder::new(["GET"], "/about", "About:show"))
        .unwrap();

    let resolution = router
        .resolve(&RequestContext::new("GET", "/about?lang=en"))
        .unwrap();
    let redirect = resolution.redirect().unwrap();
    assert_eq!(redirect.status(), 301);
    assert_eq!(redirect.location(), "/about/?lang=en");
}

#[test]
fn test_absolute_url_from_origin() {
    let mut router = Router::new(RouterConfig::new().base_path("shop")).unwrap();
    router
        .add(RouteBuilder::new(["GET"], "/", "Home:run").name("home"))
        .unwrap();

    let origin = Origin::new("https", "example.com");
    assert_eq!(router.base_url(&origin), "https://example.com/shop");

    let generated = router.url("home", None, &Parameters::new(), &origin).unwrap();
    assert_eq!(generated.path(), "https://example.com/shop/");
}

#[cfg(feature = "config")]
#[test]
fn test_manifest_through_facade() {
    let manifest = polyroute::polyroute_config::RouteManifest::parse(
        r#"{"routes": [{"methods": ["GET"], "pattern": "/x", "controller": "X:run", "name": "x"}]}"#,
        polyroute::polyroute_config::FileFormat::Json,
    )
    .unwrap();
    let router = manifest.build_router().unwrap();
    assert_eq!(
        router.uri("x", None, &Parameters::new()).unwrap().path(),
        "/x/"
    );
}
