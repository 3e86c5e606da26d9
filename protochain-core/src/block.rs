//! Block data structures
//!
//! A block is a header plus a list of transactions. Headers carry the
//! packed protocol version; height, previous hash and nonce start out
//! unset on regular blocks and have to be filled in before the header
//! counts as fully initialized.

use chrono::{DateTime, Utc};
use protochain_version::FullVersion;
use serde_json::{json, Value};
use tracing::debug;

use crate::{timestamp, BlockHash, BlockNumber, CoreError, CoreResult, TxMessage};

/// Height of the genesis block
pub const GENESIS_HEIGHT: BlockNumber = 0;

/// Default mining difficulty (inert placeholder, no mining happens here)
pub const DEFAULT_DIFFICULTY: u32 = 2;

/// Minimal accepted difficulty
pub const MINIMAL_DIFFICULTY: u32 = 1;

/// Block header: the protocol version in its packed form plus the usual
/// chain bookkeeping fields.
///
/// Nonce and difficulty are inert placeholders and the merkle root is a
/// stub; see the crate docs.
#[derive(Debug)]
pub struct BlockHeader {
    version: FullVersion,
    height: Option<BlockNumber>,
    prev_hash: Option<BlockHash>,
    merkle_root: BlockHash,
    moment: DateTime<Utc>,
    difficulty: u32,
    nonce: Option<u64>,
    genesis: bool,
}

impl BlockHeader {
    /// Create a partially initialized regular header: height, previous
    /// hash and nonce stay unset until filled in.
    pub fn new(version: FullVersion) -> Self {
        Self::build(version, false)
    }

    /// Create the genesis header: height 0 and a zero previous hash are
    /// preset (the nonce placeholder still starts unset).
    pub fn genesis(version: FullVersion) -> Self {
        Self::build(version, true)
    }

    fn build(version: FullVersion, genesis: bool) -> Self {
        let moment = timestamp::this_moment();
        let header = Self {
            version,
            height: genesis.then_some(GENESIS_HEIGHT),
            prev_hash: genesis.then(BlockHash::zero),
            merkle_root: BlockHash::zero(),
            moment,
            difficulty: DEFAULT_DIFFICULTY,
            nonce: None,
            genesis,
        };
        debug!(
            version = %header.version,
            genesis,
            moment = %timestamp::moment_to_str(&moment),
            "created block header"
        );
        header
    }

    /// Whether height, previous hash and nonce have all been set.
    pub fn fully_initialized(&self) -> bool {
        self.height.is_some() && self.prev_hash.is_some() && self.nonce.is_some()
    }

    /// Protocol version of this header. The codec's setters take `&self`,
    /// so the version can be bumped through this reference.
    pub fn version(&self) -> &FullVersion {
        &self.version
    }

    /// Block height, if set
    pub fn height(&self) -> Option<BlockNumber> {
        self.height
    }

    /// Hash of the previous block, if set
    pub fn prev_hash(&self) -> Option<BlockHash> {
        self.prev_hash
    }

    /// Merkle root stub
    pub fn merkle_root(&self) -> BlockHash {
        self.merkle_root
    }

    /// UTC moment this header was created
    pub fn moment(&self) -> DateTime<Utc> {
        self.moment
    }

    /// Difficulty placeholder
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Nonce placeholder, if set
    pub fn nonce(&self) -> Option<u64> {
        self.nonce
    }

    /// Whether this is the genesis header
    pub fn is_genesis(&self) -> bool {
        self.genesis
    }

    /// Set the height; only positive heights are accepted (the genesis
    /// height is preset by the constructor, never assigned).
    pub fn set_height(&mut self, height: BlockNumber) -> CoreResult<()> {
        if height == 0 {
            return Err(CoreError::InvalidHeight(height));
        }
        self.height = Some(height);
        Ok(())
    }

    /// Set the hash of the previous block
    pub fn set_prev_hash(&mut self, hash: BlockHash) {
        self.prev_hash = Some(hash);
    }

    /// Replace the merkle-root stub
    pub fn set_merkle_root(&mut self, root: BlockHash) {
        self.merkle_root = root;
    }

    /// Set the difficulty placeholder
    pub fn set_difficulty(&mut self, difficulty: u32) -> CoreResult<()> {
        if difficulty < MINIMAL_DIFFICULTY {
            return Err(CoreError::InvalidDifficulty(difficulty));
        }
        self.difficulty = difficulty;
        Ok(())
    }

    /// Set the nonce placeholder
    pub fn set_nonce(&mut self, nonce: u64) {
        self.nonce = Some(nonce);
    }

    /// Dictionary form of the header. The `version` field carries the
    /// dotted string form of the packed full version.
    pub fn as_dict(&self) -> Value {
        json!({
            "version": &self.version,
            "height": self.height,
            "prev_hash": self.prev_hash.map(|h| h.to_hex()),
            "merkle_root": self.merkle_root.to_hex(),
            "moment": timestamp::moment_to_str(&self.moment),
            "difficulty": self.difficulty,
            "nonce": self.nonce,
            "genesis": self.genesis,
        })
    }

    /// JSON string form of [`as_dict`](Self::as_dict)
    pub fn as_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(&self.as_dict())?)
    }

    /// JSON form as bytes
    pub fn as_bytes(&self) -> CoreResult<Vec<u8>> {
        Ok(self.as_json()?.into_bytes())
    }

    /// Size of the JSON form in bytes
    pub fn size_in_bytes(&self) -> CoreResult<usize> {
        Ok(self.as_bytes()?.len())
    }

    /// Number of fields in the dictionary form
    pub fn member_count(&self) -> usize {
        self.as_dict().as_object().map_or(0, |map| map.len())
    }
}

/// Transaction list of a single block
#[derive(Debug, Default)]
pub struct BlockTxs {
    txs: Vec<TxMessage>,
}

impl BlockTxs {
    /// Create an empty transaction list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction
    pub fn add_tx(&mut self, tx: TxMessage) {
        self.txs.push(tx);
    }

    /// Number of transactions
    pub fn len(&self) -> usize {
        self.txs.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }

    /// The transactions themselves
    pub fn txs(&self) -> &[TxMessage] {
        &self.txs
    }

    /// Dictionary form: an array of transaction dictionaries
    pub fn as_dict(&self) -> Value {
        Value::Array(self.txs.iter().map(TxMessage::as_dict).collect())
    }
}

/// Complete block: header plus content (the magic number is an inert
/// placeholder, like nonce and difficulty)
#[derive(Debug)]
pub struct Block {
    magic_number: u32,
    header: BlockHeader,
    content: BlockTxs,
}

impl Block {
    /// Create a regular block with an empty transaction list
    pub fn new(version: FullVersion) -> Self {
        Self {
            magic_number: 0,
            header: BlockHeader::new(version),
            content: BlockTxs::new(),
        }
    }

    /// Create the genesis block
    pub fn genesis(version: FullVersion) -> Self {
        Self {
            magic_number: 0,
            header: BlockHeader::genesis(version),
            content: BlockTxs::new(),
        }
    }

    /// Magic number placeholder
    pub fn magic_number(&self) -> u32 {
        self.magic_number
    }

    /// The block header
    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    /// Mutable access to the header
    pub fn header_mut(&mut self) -> &mut BlockHeader {
        &mut self.header
    }

    /// The block's transactions
    pub fn content(&self) -> &BlockTxs {
        &self.content
    }

    /// Append a transaction to the block
    pub fn add_tx(&mut self, tx: TxMessage) {
        self.content.add_tx(tx);
    }

    /// Whether this is the genesis block
    pub fn is_genesis(&self) -> bool {
        self.header.genesis
    }
}
