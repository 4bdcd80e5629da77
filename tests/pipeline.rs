//! End-to-end test of the pure pipeline stages: listing parse, id
//! batching, detail payload parse, and record merging. Network stages
//! are covered by unit tests against local failure modes.

use bgcrawl::models::{NO_CHINESE_NAME, PollResult};
use bgcrawl::services::detail::{join_ids, parse_detail_payload, placeholders_for_batch};
use bgcrawl::services::listing::{ListingPage, parse_listing_page};
use bgcrawl::services::merge::merge_pages;

const LISTING_HTML: &str = r#"
<table>
  <tr>
    <td class="collection_thumbnail">
      <a href="/boardgame/13/catan"><img src="https://img.example/13.jpg"></a>
    </td>
    <td id="CEcell_objectname1"><a href="/boardgame/13/catan">Catan</a></td>
    <td class="collection_bggrating">7.098</td>
    <td class="collection_bggrating">7.2</td>
    <td class="collection_bggrating">113683</td>
  </tr>
  <tr>
    <td class="collection_thumbnail">
      <a href="/boardgame/822/carcassonne"><img src="https://img.example/822.jpg"></a>
    </td>
    <td id="CEcell_objectname2"><a href="/boardgame/822/carcassonne">Carcassonne</a></td>
    <td class="collection_bggrating">7.3</td>
    <td class="collection_bggrating">7.4</td>
    <td class="collection_bggrating">120000</td>
  </tr>
</table>
"#;

const DETAIL_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<items>
  <item type="boardgame" id="13">
    <name type="primary" sortindex="1" value="Catan"/>
    <name type="alternate" sortindex="1" value="&#21345;&#22374;&#23707;"/>
    <yearpublished value="1995"/>
    <minplayers value="3"/>
    <maxplayers value="4"/>
    <poll name="suggested_numplayers" title="User Suggested Number of Players" totalvotes="2212">
      <results numplayers="3">
        <result value="Best" numvotes="333"/>
      </results>
      <results numplayers="4">
        <result value="Best" numvotes="1243"/>
      </results>
    </poll>
    <description>Trade, build, settle.</description>
  </item>
  <item type="boardgame" id="822">
    <name type="primary" sortindex="1" value="Carcassonne"/>
    <yearpublished value="2000"/>
  </item>
</items>"#;

#[test]
fn two_entries_merge_into_two_records_in_listing_order() {
    let entries = parse_listing_page(LISTING_HTML, 1).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(join_ids(&entries), "13,822");

    let details = parse_detail_payload(DETAIL_XML).unwrap();
    assert_eq!(details.len(), 2);

    let pages = vec![ListingPage { page: 1, entries }];
    let records = merge_pages(&pages, &[details]);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].rank, Some(1));
    assert_eq!(records[0].game_id, 13);
    assert_eq!(records[0].default_name, "卡坦岛");
    assert_eq!(records[0].chinese_name, "卡坦岛");
    assert_eq!(records[0].yearpublished, vec![1995]);
    assert_eq!(
        records[0].poll,
        vec![PollResult::PlayerCount {
            name: "suggested_numplayers".to_string(),
            num: 4,
            has_upper_limit: false,
        }]
    );

    assert_eq!(records[1].rank, Some(2));
    assert_eq!(records[1].game_id, 822);
    assert_eq!(records[1].default_name, "Carcassonne");
    assert_eq!(records[1].chinese_name, NO_CHINESE_NAME);
    assert!(records[1].poll.is_empty());
}

#[test]
fn failed_detail_batch_still_yields_full_page_of_records() {
    let entries = parse_listing_page(LISTING_HTML, 1).unwrap();
    let batch = join_ids(&entries);
    let placeholders = placeholders_for_batch(&batch);

    let pages = vec![ListingPage { page: 1, entries }];
    let records = merge_pages(&pages, &[placeholders]);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].default_name, "Catan");
    assert!(records[0].name.is_empty());
    assert_eq!(records[1].default_name, "Carcassonne");
}
