//! Block connect / disconnect against persisted auction records.

use std::collections::HashMap;

use hns_common::{ChainParams, Network, REGTEST_DEFAULT_PARAMS};
use hns_state::{
    AuctionPhase, AuctionRecord, CoinEntry, Journal, MemoryCoinView, NameHash, Op, Outpoint,
    Owner, WireSerde,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .try_init();
}

/// Stands in for the database: encoded records plus per-block undo logs.
#[derive(Default)]
struct MockNameDb {
    records: HashMap<NameHash, Vec<u8>>,
    undo: HashMap<u32, Vec<(NameHash, Vec<u8>)>>,
}

impl MockNameDb {
    fn load(&self, name_hash: &NameHash) -> AuctionRecord {
        self.records
            .get(name_hash)
            .map(|bytes| AuctionRecord::from_bytes(bytes).unwrap())
            .unwrap_or_default()
    }

    fn connect<F>(&mut self, height: u32, name: &str, mutate: F)
    where
        F: FnOnce(&mut AuctionRecord, &mut Journal),
    {
        let name_hash = NameHash::of(name.as_bytes());
        let mut record = self.load(&name_hash);
        let mut journal = Journal::new();
        mutate(&mut record, &mut journal);

        self.records
            .insert(*record.name_hash(), record.to_bytes().unwrap());
        self.undo
            .entry(height)
            .or_default()
            .push((name_hash, journal.to_bytes().unwrap()));
    }

    fn disconnect(&mut self, height: u32) {
        let entries = self.undo.remove(&height).unwrap_or_default();
        for (name_hash, bytes) in entries.into_iter().rev() {
            let journal = Journal::from_bytes(&bytes).unwrap();
            let mut record = self.load(&name_hash);
            journal.revert(&mut record);
            if record.is_null() {
                self.records.remove(&name_hash);
            } else {
                self.records.insert(name_hash, record.to_bytes().unwrap());
            }
        }
    }
}

#[test]
fn open_bid_then_disconnect_both_blocks() {
    init_tracing();

    let params: ChainParams = REGTEST_DEFAULT_PARAMS;
    let empty = AuctionRecord::new();
    let owner = Outpoint::new([0xaa; 32], 1);

    let mut record = empty.clone();
    let mut journal = Journal::new();
    record.edit(&mut journal).set_auction("example", 100);
    record
        .edit(&mut journal)
        .set_owner(Some(Owner::new(owner, 5_000)));

    let decoded = AuctionRecord::from_bytes(&record.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded, record);
    assert_eq!(decoded.owner().map(|o| o.outpoint), Some(owner));
    assert_eq!(decoded.value(), 5_000);
    assert_eq!(decoded.height(), 100);
    assert_eq!(decoded.renewal(), 100);
    assert_eq!(decoded.name_hash(), &NameHash::of(b"example"));

    // 140 >= 100 + 15.
    assert_eq!(decoded.phase(140, &params), AuctionPhase::Closed);
    assert_eq!(decoded.phase(107, &params), AuctionPhase::Reveal);
    assert!(!decoded.is_expired(140, &params));

    let mut restored = decoded;
    journal.revert(&mut restored);
    assert_eq!(restored, empty);
    assert!(restored.is_null());
}

#[test]
fn driver_round_trip_through_storage() {
    init_tracing();

    let params = Network::Regtest(REGTEST_DEFAULT_PARAMS).params();
    let name_hash = NameHash::of(b"example");
    let winner = Outpoint::new([0x11; 32], 0);
    let mut db = MockNameDb::default();

    db.connect(100, "example", |record, journal| {
        record.edit(journal).set_auction("example", 100);
    });
    let after_open = db.load(&name_hash);

    db.connect(116, "example", |record, journal| {
        assert!(record.is_closed(116, &params));
        record
            .edit(journal)
            .set_owner(Some(Owner::new(winner, 2_500)))
            .set_data(Some(b"resource".to_vec()))
            .set_renewal(116);
    });
    let after_register = db.load(&name_hash);
    assert_eq!(after_register.value(), 2_500);
    assert_eq!(after_register.data(), Some(&b"resource"[..]));

    // Lapse and restart: the old data must come back on disconnect.
    let restart_height = 116 + params.renewal_window;
    db.connect(restart_height, "example", |record, journal| {
        assert!(record.is_expired(restart_height, &params));
        record.edit(journal).set_auction("example", restart_height);
        assert!(matches!(journal.undo()[0], Op::SetData(Some(_))));
    });
    let restarted = db.load(&name_hash);
    assert_eq!(restarted.owner(), None);
    assert_eq!(restarted.data(), None);
    assert!(restarted.is_bidding(restart_height, &params));

    db.disconnect(restart_height);
    assert_eq!(db.load(&name_hash), after_register);

    db.disconnect(116);
    assert_eq!(db.load(&name_hash), after_open);

    db.disconnect(100);
    assert!(db.load(&name_hash).is_null());
    assert!(db.records.is_empty());
}

#[test]
fn stale_outputs_are_not_local_to_a_new_cycle() {
    init_tracing();

    let stale = Outpoint::new([0x22; 32], 0);
    let fresh = Outpoint::new([0x33; 32], 0);
    let pending = Outpoint::new([0x44; 32], 0);

    let mut view = MemoryCoinView::new();
    view.insert(stale, CoinEntry::confirmed(50, 1_000));
    view.insert(fresh, CoinEntry::confirmed(300, 1_000));
    view.insert(pending, CoinEntry::unconfirmed(1_000));

    let mut record = AuctionRecord::new();
    record.edit(&mut Journal::new()).set_auction("replay", 200);

    assert!(!record.is_local(&view, &stale));
    assert!(record.is_local(&view, &fresh));
    assert!(record.is_local(&view, &pending));
    assert!(record.is_local(&view, &Outpoint::new([0x55; 32], 3)));

    view.remove(&stale);
    assert!(record.is_local(&view, &stale));
}
