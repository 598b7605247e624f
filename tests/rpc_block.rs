//! Tests for building block records from Alloy RPC blocks.
//!
//! The RPC block is decoded from a recorded `eth_getBlockByNumber` response
//! so the test does not depend on a live node.

use forta_agent::block::Block;
use forta_agent::event::{BlockEvent, EventType};
use forta_agent::network::Network;

const RPC_BLOCK: &str = r#"{
    "hash": "0x5c8c4d8c9d6a4b8c7e1f0a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f",
    "parentHash": "0x1f0e2d3c4b5a69788796a5b4c3d2e1f00f1e2d3c4b5a69788796a5b4c3d2e1f0",
    "sha3Uncles": "0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347",
    "miner": "0x95222290dd7278aa3ddd389cc1e1d165cc4bafe5",
    "stateRoot": "0xd7f8974fb5ac78d9ac099b9ad5018bedc2ce0a72dad1827a1709da30580f0544",
    "transactionsRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
    "receiptsRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
    "logsBloom": "0x00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
    "difficulty": "0x0",
    "number": "0x121eac0",
    "gasLimit": "0x1c9c380",
    "gasUsed": "0xe4e1c0",
    "timestamp": "0x65a2b1c3",
    "extraData": "0x6265617665726275696c642e6f7267",
    "mixHash": "0x0000000000000000000000000000000000000000000000000000000000000000",
    "nonce": "0x0000000000000000",
    "baseFeePerGas": "0x3b9aca00",
    "totalDifficulty": "0xc70d815d562d3cfa955",
    "size": "0x2f9c1",
    "uncles": [],
    "transactions": [
        "0x1111111111111111111111111111111111111111111111111111111111111111",
        "0x2222222222222222222222222222222222222222222222222222222222222222"
    ]
}"#;

fn rpc_block() -> alloy::rpc::types::Block {
    serde_json::from_str(RPC_BLOCK).unwrap()
}

#[test]
fn test_header_fields_converted() {
    let block = Block::from(&rpc_block());

    assert_eq!(block.number, 19_000_000);
    assert_eq!(block.timestamp, 0x65a2_b1c3);
    assert_eq!(
        block.hash,
        "0x5c8c4d8c9d6a4b8c7e1f0a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f"
    );
    assert_eq!(
        block.parent_hash,
        "0x1f0e2d3c4b5a69788796a5b4c3d2e1f00f1e2d3c4b5a69788796a5b4c3d2e1f0"
    );
    assert_eq!(
        block.sha3_uncles,
        "0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347"
    );
    assert_eq!(block.gas_limit, "0x1c9c380");
    assert_eq!(block.gas_used, "0xe4e1c0");
    assert_eq!(block.extra_data, "0x6265617665726275696c642e6f7267");
    assert_eq!(block.size, "0x2f9c1");
    assert_eq!(
        block.miner.to_lowercase(),
        "0x95222290dd7278aa3ddd389cc1e1d165cc4bafe5"
    );
    assert_eq!(
        block.state_root,
        "0xd7f8974fb5ac78d9ac099b9ad5018bedc2ce0a72dad1827a1709da30580f0544"
    );
    assert_eq!(
        block.receipts_root,
        "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421"
    );
    assert_eq!(block.transactions_root, block.receipts_root);
    assert_eq!(block.total_difficulty, "0xc70d815d562d3cfa955");
    assert_eq!(block.mix_hash, format!("0x{}", "0".repeat(64)));
    assert_eq!(block.nonce, "0x0000000000000000");
    assert_eq!(block.logs_bloom, format!("0x{}", "0".repeat(512)));
    assert_eq!(block.difficulty, "0x0");
}

/// The raw RPC JSON decodes straight into the record with hex quantities.
#[test]
fn test_rpc_json_decodes_directly() {
    let direct: Block = serde_json::from_str(RPC_BLOCK).unwrap();
    let converted = Block::from(&rpc_block());

    assert_eq!(direct.number, 19_000_000);
    assert_eq!(direct.timestamp, converted.timestamp);
    assert_eq!(direct.transactions, converted.transactions);
    assert_eq!(direct.state_root, converted.state_root);
}

#[test]
fn test_transaction_hashes_kept_in_order() {
    let block = Block::from(&rpc_block());

    assert_eq!(
        block.transactions,
        vec![
            "0x1111111111111111111111111111111111111111111111111111111111111111",
            "0x2222222222222222222222222222222222222222222222222222222222222222",
        ]
    );
    assert!(block.uncles.is_empty());
}

#[test]
fn test_converted_block_feeds_block_event() {
    let event = BlockEvent::new(EventType::Block, Network::Mainnet, Block::from(&rpc_block()));

    assert_eq!(event.block_number(), 19_000_000);
    assert_eq!(event.block_hash(), event.block.hash);
    assert!(event.block.timestamp_utc().is_some());
}
