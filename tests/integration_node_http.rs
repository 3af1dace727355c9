#[path = "harness.rs"]
mod harness;

use powledger::consensus_pow::is_valid_proof;
use powledger::genesis::{GENESIS_HASH, GENESIS_PROOF};
use serde_json::{json, Value};

#[tokio::test]
async fn submit_mine_and_read_chain_over_http() {
    let t = harness::spawn_node("http-miner").await;
    let client = reqwest::Client::new();

    // Three submissions all target block 2.
    for (i, (from, to)) in [("alice", "bob"), ("bob", "carol"), ("carol", "alice")]
        .into_iter()
        .enumerate()
    {
        let r = client
            .post(format!("{}/transactions/new", t.base))
            .json(&json!({ "sender": from, "recipient": to, "amount": i as i64 + 1 }))
            .send()
            .await
            .expect("submit");
        assert_eq!(r.status(), reqwest::StatusCode::CREATED);
        let body: Value = r.json().await.unwrap();
        assert_eq!(body["index"], 2);
    }

    let mined: Value = client
        .get(format!("{}/mine", t.base))
        .send()
        .await
        .expect("mine")
        .json()
        .await
        .unwrap();
    assert_eq!(mined["index"], 2);
    assert_eq!(mined["previousHash"], GENESIS_HASH);
    assert!(is_valid_proof(mined["proof"].as_u64().unwrap(), GENESIS_PROOF));

    let txs = mined["transactions"].as_array().unwrap();
    assert_eq!(txs.len(), 4);
    assert_eq!(txs[0]["sender"], "alice");
    assert_eq!(txs[2]["recipient"], "alice");
    assert_eq!(txs[3], json!({ "sender": "0", "recipient": "http-miner", "amount": 1 }));

    let chain: Value = client
        .get(format!("{}/chain", t.base))
        .send()
        .await
        .expect("chain")
        .json()
        .await
        .unwrap();
    assert_eq!(chain["length"], 2);
    assert_eq!(chain["chain"].as_array().unwrap().len(), 2);
    assert_eq!(chain["chain"][1]["previousHash"], GENESIS_HASH);
    assert!(t.node.pending_snapshot().is_empty());
}

#[tokio::test]
async fn two_nodes_converge_on_the_longer_chain() {
    let a = harness::spawn_node("node-a").await;
    let b = harness::spawn_node("node-b").await;
    let client = reqwest::Client::new();

    harness::grow_to(&a.node, 2).await;
    let b_chain = harness::grow_to(&b.node, 4).await;

    let r = client
        .post(format!("{}/nodes/register", a.base))
        .json(&json!({ "nodes": [b.base.clone()] }))
        .send()
        .await
        .unwrap();
    assert_eq!(r.status(), reqwest::StatusCode::CREATED);
    let body: Value = r.json().await.unwrap();
    assert_eq!(body["total_nodes"], json!([b.addr.to_string()]));

    let resolved: Value = client
        .get(format!("{}/nodes/resolve", a.base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(resolved["replaced"], true);
    assert_eq!(resolved["chain"].as_array().unwrap().len(), 4);
    assert_eq!(a.node.chain_snapshot().0, b_chain);

    // B resolving against A changes nothing: A is now an equal copy.
    b.node.register_peers(&[a.addr.to_string()]).unwrap();
    let outcome = b.node.resolve_conflicts().await.unwrap();
    assert!(!outcome.replaced);
    assert_eq!(outcome.chain, b_chain);
}

#[tokio::test]
async fn resolve_with_no_peers_is_authoritative() {
    let t = harness::spawn_node("lonely").await;
    let body: Value = reqwest::get(format!("{}/nodes/resolve", t.base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["replaced"], false);
    assert_eq!(body["message"], "Our chain is authoritative");
    assert_eq!(body["chain"].as_array().unwrap().len(), 1);
}
