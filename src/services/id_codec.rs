/*
 * Responsibility
 * - ブログの公開 ID ↔ 内部 ID (i64) の変換
 * - 方式 (sqids) をここに閉じ込める。handler/extractor はこの service だけを使う
 * - decode 失敗はクライアント入力の問題 (MalformedId)、encode 失敗はサーバ側の問題
 */
use sqids::Sqids;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IdCodecError>;

#[derive(Debug, Error)]
pub enum IdCodecError {
    #[error("SQIDS_MIN_LENGTH must be between 0 and 255, got {value}")]
    InvalidMinLength { value: usize },
    #[error("sqids error: {0}")]
    Sqids(#[from] sqids::Error),
    #[error("id must be non-negative, got {value}")]
    NegativeId { value: i64 },
    #[error("invalid public id format")]
    Malformed,
}

impl IdCodecError {
    /// Errors caused by what the client sent, as opposed to configuration.
    pub fn is_client_error(&self) -> bool {
        matches!(self, IdCodecError::Malformed)
    }
}

#[derive(Clone, Debug)]
pub struct IdCodec {
    sqids: Sqids,
}

impl IdCodec {
    pub fn new(min_length: usize, alphabet: &str) -> Result<Self> {
        let min_length: u8 = min_length
            .try_into()
            .map_err(|_| IdCodecError::InvalidMinLength { value: min_length })?;

        let sqids = Sqids::builder()
            .min_length(min_length)
            .alphabet(alphabet.chars().collect())
            .build()?;

        Ok(Self { sqids })
    }

    pub fn encode(&self, id: i64) -> Result<String> {
        let n = u64::try_from(id).map_err(|_| IdCodecError::NegativeId { value: id })?;
        Ok(self.sqids.encode(&[n])?)
    }

    /// Only the canonical form `encode` produces is accepted. Shorter or
    /// otherwise aliased strings that happen to decode are malformed.
    pub fn decode(&self, public_id: &str) -> Result<i64> {
        let [n] = self.sqids.decode(public_id)[..] else {
            return Err(IdCodecError::Malformed);
        };
        let id = i64::try_from(n).map_err(|_| IdCodecError::Malformed)?;

        match self.sqids.encode(&[n]) {
            Ok(canonical) if canonical == public_id => Ok(id),
            _ => Err(IdCodecError::Malformed),
        }
    }
}
