use importer::{
    FixedDelay, ImageBackfiller, ImporterError, RosterSource, RosterSynchronizer, WikiConfig,
    WikiSource,
};
use mockito::{Mock, ServerGuard};
use storage::{
    dto::character::RosterOrder,
    models::NewCharacter,
    repository::{RosterStore, memory::InMemoryRoster},
};

const LISTING_PATH: &str = "/wiki/List_of_Characters";

const LISTING_HTML: &str = r#"
<html><body>
<table class="article-table">
    <tr><th>Image</th><th>Name</th><th>Affiliation</th></tr>
    <tr>
        <td><img src="data:image/gif;base64,R0lGODlh" data-src="https://static.example/yuji.png"></td>
        <td><a href="/wiki/Yuji_Itadori">Yuji Itadori</a></td>
        <td><a href="/wiki/Jujutsu_High">Jujutsu High</a></td>
    </tr>
    <tr>
        <td></td>
        <td><a href="/wiki/Megumi_Fushiguro">Megumi Fushiguro</a></td>
        <td><a href="/wiki/Jujutsu_High">Jujutsu High</a></td>
    </tr>
    <tr><td colspan="3">Cursed Spirits</td></tr>
</table>
</body></html>
"#;

fn article(thumbnail: Option<&str>) -> String {
    match thumbnail {
        Some(src) => format!(
            r#"<aside class="portable-infobox"><img class="pi-image-thumbnail" src="{}"></aside>"#,
            src
        ),
        None => "<div class=\"mw-parser-output\"><p>Stub article</p></div>".to_string(),
    }
}

fn source_for(server: &ServerGuard) -> WikiSource {
    WikiSource::new(&WikiConfig {
        base_url: server.url(),
        list_path: LISTING_PATH.to_string(),
    })
    .unwrap()
}

async fn mock_page(server: &mut ServerGuard, path: &str, status: usize, body: String) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_header("content-type", "text/html")
        .with_body(body)
        .expect(1)
        .create_async()
        .await
}

#[tokio::test]
async fn test_fetch_roster_parses_listing() {
    let mut server = mockito::Server::new_async().await;
    let listing = mock_page(&mut server, LISTING_PATH, 200, LISTING_HTML.to_string()).await;

    let entries = source_for(&server).fetch_roster().await.unwrap();

    listing.assert_async().await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name(), "Yuji Itadori");
    assert_eq!(
        entries[0].image_path.as_deref(),
        Some("https://static.example/yuji.png")
    );
    assert_eq!(entries[1].name(), "Megumi Fushiguro");
    assert_eq!(entries[1].image_path, None);
}

#[tokio::test]
async fn test_sync_replaces_roster_from_listing() {
    let mut server = mockito::Server::new_async().await;
    mock_page(&mut server, LISTING_PATH, 200, LISTING_HTML.to_string()).await;
    let store = InMemoryRoster::with_entries(&[NewCharacter::from_name("Old Entry", None)]);

    let source = source_for(&server);
    let outcome = RosterSynchronizer::new(&source).sync(&store).await.unwrap();

    assert_eq!(outcome.applied, 2);
    let names: Vec<String> = store
        .list(RosterOrder::Name)
        .await
        .unwrap()
        .iter()
        .map(|c| c.name())
        .collect();
    assert_eq!(names, ["Megumi Fushiguro", "Yuji Itadori"]);
}

#[tokio::test]
async fn test_sync_skips_overlong_labels_instead_of_failing() {
    let listing = format!(
        r#"<html><body><table>
            <tr><th>Image</th><th>Name</th></tr>
            <tr><td></td><td><a href="/wiki/Noise">{}</a></td></tr>
            <tr><th><a href="/wiki/Maki_Zenin">Maki Zenin</a></th><th>Grade 4</th></tr>
            <tr><td></td><td><a href="/wiki/Panda">Panda</a></td></tr>
        </table></body></html>"#,
        "Cursed Technique Lapse ".repeat(10)
    );
    let mut server = mockito::Server::new_async().await;
    mock_page(&mut server, LISTING_PATH, 200, listing).await;
    let store = InMemoryRoster::with_entries(&[NewCharacter::from_name("Old Entry", None)]);

    let source = source_for(&server);
    let outcome = RosterSynchronizer::new(&source).sync(&store).await.unwrap();

    assert_eq!(outcome.applied, 2);
    let names: Vec<String> = store
        .list(RosterOrder::Name)
        .await
        .unwrap()
        .iter()
        .map(|c| c.name())
        .collect();
    assert_eq!(names, ["Maki Zenin", "Panda"]);
}

#[tokio::test]
async fn test_sync_with_empty_listing_keeps_roster() {
    let mut server = mockito::Server::new_async().await;
    mock_page(
        &mut server,
        LISTING_PATH,
        200,
        "<html><body><p>Under maintenance</p></body></html>".to_string(),
    )
    .await;
    let store = InMemoryRoster::with_entries(&[
        NewCharacter::from_name("Kento Nanami", None),
        NewCharacter::from_name("Aoi Todo", None),
    ]);

    let source = source_for(&server);
    let outcome = RosterSynchronizer::new(&source).sync(&store).await.unwrap();

    assert_eq!(outcome.applied, 0);
    assert_eq!(store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_sync_surfaces_upstream_errors() {
    let mut server = mockito::Server::new_async().await;
    mock_page(&mut server, LISTING_PATH, 503, String::new()).await;
    let store = InMemoryRoster::with_entries(&[NewCharacter::from_name("Kento Nanami", None)]);

    let source = source_for(&server);
    let err = RosterSynchronizer::new(&source).sync(&store).await.unwrap_err();

    assert!(matches!(err, ImporterError::UpstreamStatus { status, .. } if status.as_u16() == 503));
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_backfill_updates_skips_and_survives_failures() {
    let mut server = mockito::Server::new_async().await;
    let gojo = mock_page(
        &mut server,
        "/wiki/Satoru_Gojo",
        200,
        article(Some("https://static.example/gojo.png")),
    )
    .await;
    let mahito = mock_page(&mut server, "/wiki/Mahito", 200, article(None)).await;
    let geto = mock_page(&mut server, "/wiki/Suguru_Geto", 500, String::new()).await;

    let store = InMemoryRoster::with_entries(&[
        NewCharacter::from_name("Satoru Gojo", None),
        NewCharacter::from_name("Mahito", Some("/old/mahito.png".to_string())),
        NewCharacter::from_name("Suguru Geto", None),
    ]);

    let source = source_for(&server);
    let summary = ImageBackfiller::new(&source, FixedDelay::from_millis(0))
        .backfill(&store)
        .await
        .unwrap();

    gojo.assert_async().await;
    mahito.assert_async().await;
    geto.assert_async().await;

    assert_eq!(summary.total, 3);
    assert_eq!((summary.updated, summary.skipped, summary.failed), (1, 1, 1));
    assert_eq!(summary.total, summary.updated + summary.skipped + summary.failed);

    let roster = store.list(RosterOrder::Name).await.unwrap();
    let mahito = roster.iter().find(|c| c.first_name == "Mahito").unwrap();
    assert_eq!(mahito.image_path.as_deref(), Some("/old/mahito.png"));
    let gojo = roster.iter().find(|c| c.first_name == "Satoru").unwrap();
    assert_eq!(gojo.image_path.as_deref(), Some("https://static.example/gojo.png"));
}
