use std::fmt;
use std::str::FromStr;

use bip39::Mnemonic;
use bitcoin::bip32::{DerivationPath, Xpriv};
use bitcoin::secp256k1::Secp256k1;
use bitcoin::{Address, Network};

/// A session wallet. Keys live only in memory; the rest of the application
/// just reads these three fields.
#[derive(Debug, Clone)]
pub struct Wallet {
    pub address: String,
    pub private_key_wif: String,
    pub mnemonic: String,
}

#[derive(Debug)]
pub enum WalletError {
    Mnemonic(bip39::Error),
    Derivation(bitcoin::bip32::Error),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::Mnemonic(e) => write!(f, "mnemonic error: {e}"),
            WalletError::Derivation(e) => write!(f, "key derivation error: {e}"),
        }
    }
}

impl std::error::Error for WalletError {}

impl From<bip39::Error> for WalletError {
    fn from(e: bip39::Error) -> Self {
        WalletError::Mnemonic(e)
    }
}

impl From<bitcoin::bip32::Error> for WalletError {
    fn from(e: bitcoin::bip32::Error) -> Self {
        WalletError::Derivation(e)
    }
}

/// Generate a wallet from a fresh 24-word mnemonic.
pub fn generate(derivation_path: &str) -> Result<Wallet, WalletError> {
    let mnemonic = Mnemonic::generate(24)?;
    from_mnemonic(&mnemonic, derivation_path)
}

/// Derive the testnet deposit key along `derivation_path`: P2PKH address
/// plus the WIF form of the child private key.
pub fn from_mnemonic(mnemonic: &Mnemonic, derivation_path: &str) -> Result<Wallet, WalletError> {
    let secp = Secp256k1::new();
    let seed = mnemonic.to_seed("");
    let master = Xpriv::new_master(Network::Testnet, &seed)?;
    let path = DerivationPath::from_str(derivation_path)?;
    let node = master.derive_priv(&secp, &path)?;

    let private_key = node.to_priv();
    let public_key = private_key.public_key(&secp);
    let address = Address::p2pkh(&public_key, Network::Testnet);

    Ok(Wallet {
        address: address.to_string(),
        private_key_wif: private_key.to_wif(),
        mnemonic: mnemonic.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::PrivateKey;

    const PATH: &str = "m/44'/1'/0'/0/0";
    const TEST_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn generates_a_24_word_mnemonic() {
        let wallet = generate(PATH).unwrap();
        assert_eq!(wallet.mnemonic.split_whitespace().count(), 24);
    }

    #[test]
    fn derivation_is_deterministic() {
        let mnemonic = Mnemonic::parse(TEST_MNEMONIC).unwrap();
        let a = from_mnemonic(&mnemonic, PATH).unwrap();
        let b = from_mnemonic(&mnemonic, PATH).unwrap();
        assert_eq!(a.address, b.address);
        assert_eq!(a.private_key_wif, b.private_key_wif);
    }

    #[test]
    fn address_is_testnet_p2pkh() {
        let mnemonic = Mnemonic::parse(TEST_MNEMONIC).unwrap();
        let wallet = from_mnemonic(&mnemonic, PATH).unwrap();
        assert!(
            wallet.address.starts_with('m') || wallet.address.starts_with('n'),
            "unexpected address {}",
            wallet.address
        );
    }

    #[test]
    fn wif_recovers_the_same_address() {
        let mnemonic = Mnemonic::parse(TEST_MNEMONIC).unwrap();
        let wallet = from_mnemonic(&mnemonic, PATH).unwrap();

        let secp = Secp256k1::new();
        let recovered = PrivateKey::from_wif(&wallet.private_key_wif).unwrap();
        assert_eq!(recovered.network, Network::Testnet.into());
        let address = Address::p2pkh(&recovered.public_key(&secp), Network::Testnet);
        assert_eq!(address.to_string(), wallet.address);
    }

    #[test]
    fn rejects_a_malformed_derivation_path() {
        let mnemonic = Mnemonic::parse(TEST_MNEMONIC).unwrap();
        assert!(from_mnemonic(&mnemonic, "not/a/path").is_err());
    }
}
