//! In-band secret distribution for Sprout output notes.
//!
//! All outputs of a JoinSplit share one ephemeral X25519 key pair. Each output
//! is encrypted under its own symmetric key, derived from the shared secret
//! with the output's index as the KDF nonce, so no two outputs of a
//! JoinSplit ever use the same key.
//!
//! <https://zips.z.cash/protocol/protocol.pdf#sproutinband>

use chacha20poly1305::{
    aead::{AeadInPlace, KeyInit},
    ChaCha20Poly1305, Key, Nonce, Tag,
};
use rand_core::{CryptoRng, RngCore};
use thiserror::Error;

use crate::{
    primitives::x25519,
    serialization::{SerializationError, ZcashDeserializeInto},
};

use super::{
    joinsplit::HSig,
    keys::{transmission_key, PaymentAddress, ReceivingKey, TransmissionKey},
    note::{EncryptedNote, NotePlaintext, NOTE_CIPHERTEXT_SIZE, NOTE_PLAINTEXT_SIZE},
};


/// The nonce after which an encryptor refuses to encrypt.
const MAX_NONCE: u8 = 0xff;

/// Errors when encrypting output notes.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
pub enum NoteEncryptionError {
    /// Every KDF nonce of this ephemeral key has been used.
    #[error("note encryption nonce space exhausted")]
    NonceSpaceExhausted,
}

/// Errors when decrypting output notes.
#[derive(Error, Debug)]
pub enum NoteDecryptionError {
    /// The note was not encrypted to this key, or the ciphertext was modified.
    /// This is the expected outcome when scanning notes sent to other people.
    #[error("note could not be decrypted with this key")]
    NotForThisKey,

    /// The ciphertext authenticated, but does not contain a valid plaintext.
    #[error("decrypted note plaintext is malformed: {0}")]
    MalformedPlaintext(#[from] SerializationError),
}

/// Derives the symmetric key for output `nonce`:
/// BLAKE2b-256("ZcashKDF" || nonce || [0; 7], h_sig || dhsecret || epk || pk_enc)
fn kdf(
    dhsecret: &x25519::SharedSecret,
    epk: &x25519::PublicKey,
    pk_enc: &TransmissionKey,
    h_sig: &HSig,
    nonce: u8,
) -> Key {
    let mut personalization = [0u8; 16];
    personalization[..8].copy_from_slice(b"ZcashKDF");
    personalization[8] = nonce;

    let key = blake2b_simd::Params::new()
        .hash_length(32)
        .personal(&personalization)
        .to_state()
        .update(&<[u8; 32]>::from(h_sig))
        .update(dhsecret.as_bytes())
        .update(epk.as_bytes())
        .update(pk_enc.as_bytes())
        .finalize();

    Key::clone_from_slice(key.as_bytes())
}

/// Encrypts the outputs of one JoinSplit under a fresh ephemeral key.
///
/// The ephemeral secret zeroizes when the encryptor is dropped, unless it is
/// taken with [`NoteEncryptor::into_ephemeral_secret`].
pub struct NoteEncryptor {
    esk: x25519::StaticSecret,
    epk: x25519::PublicKey,
    h_sig: HSig,
    nonce: u8,
}

impl NoteEncryptor {
    /// Samples a fresh ephemeral key pair for the JoinSplit with `h_sig`.
    pub fn new<T>(csprng: &mut T, h_sig: HSig) -> NoteEncryptor
    where
        T: RngCore + CryptoRng,
    {
        let esk = x25519::StaticSecret::random_from_rng(csprng);
        let epk = x25519::PublicKey::from(&esk);

        NoteEncryptor {
            esk,
            epk,
            h_sig,
            nonce: 0,
        }
    }

    /// The ephemeral public key, published in the JoinSplit description.
    pub fn ephemeral_key(&self) -> x25519::PublicKey {
        self.epk
    }

    /// Encrypts `plaintext` to `pk_enc`, using the next unused nonce.
    pub fn encrypt(
        &mut self,
        pk_enc: &TransmissionKey,
        plaintext: &NotePlaintext,
    ) -> Result<EncryptedNote, NoteEncryptionError> {
        if self.nonce == MAX_NONCE {
            return Err(NoteEncryptionError::NonceSpaceExhausted);
        }

        let dhsecret = self.esk.diffie_hellman(pk_enc);
        let key = kdf(&dhsecret, &self.epk, pk_enc, &self.h_sig, self.nonce);
        self.nonce += 1;

        let mut bytes = [0u8; NOTE_CIPHERTEXT_SIZE];
        bytes[..NOTE_PLAINTEXT_SIZE].copy_from_slice(&plaintext.to_bytes());

        let tag = ChaCha20Poly1305::new(&key)
            .encrypt_in_place_detached(
                &Nonce::default(),
                b"",
                &mut bytes[..NOTE_PLAINTEXT_SIZE],
            )
            .expect("plaintext is far below the ChaCha20 length limit");
        bytes[NOTE_PLAINTEXT_SIZE..].copy_from_slice(&tag);

        Ok(EncryptedNote(bytes))
    }

    /// Takes the ephemeral secret, for payment disclosure.
    pub fn into_ephemeral_secret(self) -> x25519::StaticSecret {
        self.esk
    }
}

/// Encrypts a single note to `address` under a fresh ephemeral key.
///
/// Every call samples a new key pair, so repeated calls never share an
/// ephemeral key or a symmetric key.
pub fn encrypt_note<T>(
    csprng: &mut T,
    h_sig: HSig,
    address: &PaymentAddress,
    plaintext: &NotePlaintext,
) -> Result<(EncryptedNote, x25519::PublicKey), NoteEncryptionError>
where
    T: RngCore + CryptoRng,
{
    let mut encryptor = NoteEncryptor::new(csprng, h_sig);
    let ciphertext = encryptor.encrypt(&address.transmission_key, plaintext)?;

    Ok((ciphertext, encryptor.ephemeral_key()))
}

/// Decrypts output `index` of a JoinSplit with `h_sig` and ephemeral key `epk`.
pub fn decrypt_note(
    receiving_key: &ReceivingKey,
    ciphertext: &EncryptedNote,
    epk: &x25519::PublicKey,
    h_sig: &HSig,
    index: u8,
) -> Result<NotePlaintext, NoteDecryptionError> {
    let dhsecret = receiving_key.0.diffie_hellman(epk);

    // A low order ephemeral key gives everyone the same all-zero secret.
    if !dhsecret.was_contributory() {
        tracing::trace!("non-contributory Sprout ephemeral key");
        return Err(NoteDecryptionError::NotForThisKey);
    }

    let pk_enc = transmission_key(receiving_key);
    let key = kdf(&dhsecret, epk, &pk_enc, h_sig, index);

    let mut bytes = [0u8; NOTE_PLAINTEXT_SIZE];
    bytes.copy_from_slice(&ciphertext.0[..NOTE_PLAINTEXT_SIZE]);
    let tag = Tag::from_slice(&ciphertext.0[NOTE_PLAINTEXT_SIZE..]);

    ChaCha20Poly1305::new(&key)
        .decrypt_in_place_detached(&Nonce::default(), b"", &mut bytes[..], tag)
        .map_err(|_| {
            tracing::trace!(index, "Sprout note is not for this key");
            NoteDecryptionError::NotForThisKey
        })?;

    Ok(bytes[..].zcash_deserialize_into()?)
}
