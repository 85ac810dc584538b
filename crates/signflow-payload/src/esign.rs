//! Signature-method configuration blocks

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use signflow_domain::SignatureMethod;

/// `esignTypes` block attached to a signer's combination
///
/// Exactly one block is present for a single method; `Multiple` enables all
/// four at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsignTypes {
    /// Plain electronic signature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_esign: Option<VirtualEsign>,

    /// Aadhaar OTP eSign (the wire name keeps the service's spelling)
    #[serde(rename = "aadharEsign", skip_serializing_if = "Option::is_none")]
    pub aadhaar_esign: Option<AadhaarEsign>,

    /// DSC token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dsc_token: Option<DscToken>,

    /// External document signer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_sign: Option<DocSign>,
}

/// Plain electronic signature block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualEsign {
    /// Whether the method is offered
    pub virtual_esign_enabled: bool,
    /// Method options (none defined)
    pub virtual_esign_config: Map<String, Value>,
}

/// Aadhaar eSign block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AadhaarEsign {
    /// Whether the method is offered
    #[serde(rename = "aadharEsignEnabled")]
    pub enabled: bool,
    /// Method options
    #[serde(rename = "addharEsignConfig")]
    pub config: AadhaarConfig,
}

/// Aadhaar eSign options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AadhaarConfig {
    /// OTP verification
    #[serde(rename = "aadhaarOtp")]
    pub otp: bool,
}

/// DSC token block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DscToken {
    /// Whether the method is offered
    #[serde(rename = "enableDscToken")]
    pub enabled: bool,
    /// Method options (none defined)
    #[serde(rename = "dscTokenConfig")]
    pub config: Map<String, Value>,
}

/// External document signer block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocSign {
    /// Whether the method is offered
    #[serde(rename = "enableDocSigner")]
    pub enabled: bool,
}

impl VirtualEsign {
    fn enabled() -> Self {
        Self {
            virtual_esign_enabled: true,
            virtual_esign_config: Map::new(),
        }
    }
}

impl AadhaarEsign {
    fn enabled() -> Self {
        Self {
            enabled: true,
            config: AadhaarConfig { otp: true },
        }
    }
}

impl DscToken {
    fn enabled() -> Self {
        Self {
            enabled: true,
            config: Map::new(),
        }
    }
}

/// Select the configuration block for a signature method.
pub fn select(method: SignatureMethod) -> EsignTypes {
    match method {
        SignatureMethod::Standard => EsignTypes {
            virtual_esign: Some(VirtualEsign::enabled()),
            ..EsignTypes::default()
        },
        SignatureMethod::Aadhaar => EsignTypes {
            aadhaar_esign: Some(AadhaarEsign::enabled()),
            ..EsignTypes::default()
        },
        SignatureMethod::Dsc => EsignTypes {
            dsc_token: Some(DscToken::enabled()),
            ..EsignTypes::default()
        },
        SignatureMethod::Multiple => EsignTypes {
            virtual_esign: Some(VirtualEsign::enabled()),
            aadhaar_esign: Some(AadhaarEsign::enabled()),
            dsc_token: Some(DscToken::enabled()),
            doc_sign: Some(DocSign { enabled: true }),
        },
    }
}

impl EsignTypes {
    /// Number of enabled method blocks
    pub fn enabled_count(&self) -> usize {
        [
            self.virtual_esign.as_ref().is_some_and(|b| b.virtual_esign_enabled),
            self.aadhaar_esign.as_ref().is_some_and(|b| b.enabled),
            self.dsc_token.as_ref().is_some_and(|b| b.enabled),
            self.doc_sign.as_ref().is_some_and(|b| b.enabled),
        ]
        .into_iter()
        .filter(|enabled| *enabled)
        .count()
    }
}
