//! Object kinds that can be rebuilt from their JSON form.

/// Every native object type with a `<kind>_from_json` constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Schema,
    CredentialDefinition,
    CredentialDefinitionPrivate,
    KeyCorrectnessProof,
    CredentialOffer,
    CredentialRequest,
    CredentialRequestMetadata,
    Credential,
    PresentationRequest,
    Presentation,
    RevocationRegistryDefinition,
    RevocationRegistryDefinitionPrivate,
    RevocationRegistry,
    RevocationStatusList,
    RevocationState,
    W3cCredential,
    W3cPresentation,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 17] = [
        ObjectKind::Schema,
        ObjectKind::CredentialDefinition,
        ObjectKind::CredentialDefinitionPrivate,
        ObjectKind::KeyCorrectnessProof,
        ObjectKind::CredentialOffer,
        ObjectKind::CredentialRequest,
        ObjectKind::CredentialRequestMetadata,
        ObjectKind::Credential,
        ObjectKind::PresentationRequest,
        ObjectKind::Presentation,
        ObjectKind::RevocationRegistryDefinition,
        ObjectKind::RevocationRegistryDefinitionPrivate,
        ObjectKind::RevocationRegistry,
        ObjectKind::RevocationStatusList,
        ObjectKind::RevocationState,
        ObjectKind::W3cCredential,
        ObjectKind::W3cPresentation,
    ];

    /// Position in [`ObjectKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name the native library reports from `object_get_type_name`.
    pub fn type_name(self) -> &'static str {
        match self {
            ObjectKind::Schema => "Schema",
            ObjectKind::CredentialDefinition => "CredentialDefinition",
            ObjectKind::CredentialDefinitionPrivate => "CredentialDefinitionPrivate",
            ObjectKind::KeyCorrectnessProof => "CredentialKeyCorrectnessProof",
            ObjectKind::CredentialOffer => "CredentialOffer",
            ObjectKind::CredentialRequest => "CredentialRequest",
            ObjectKind::CredentialRequestMetadata => "CredentialRequestMetadata",
            ObjectKind::Credential => "Credential",
            ObjectKind::PresentationRequest => "PresentationRequest",
            ObjectKind::Presentation => "Presentation",
            ObjectKind::RevocationRegistryDefinition => "RevocationRegistryDefinition",
            ObjectKind::RevocationRegistryDefinitionPrivate => {
                "RevocationRegistryDefinitionPrivate"
            }
            ObjectKind::RevocationRegistry => "RevocationRegistry",
            ObjectKind::RevocationStatusList => "RevocationStatusList",
            ObjectKind::RevocationState => "CredentialRevocationState",
            ObjectKind::W3cCredential => "W3CCredential",
            ObjectKind::W3cPresentation => "W3CPresentation",
        }
    }

    /// Exported C symbol of the JSON constructor.
    pub fn from_json_symbol(self) -> &'static str {
        match self {
            ObjectKind::Schema => "anoncreds_schema_from_json",
            ObjectKind::CredentialDefinition => "anoncreds_credential_definition_from_json",
            ObjectKind::CredentialDefinitionPrivate => {
                "anoncreds_credential_definition_private_from_json"
            }
            ObjectKind::KeyCorrectnessProof => "anoncreds_key_correctness_proof_from_json",
            ObjectKind::CredentialOffer => "anoncreds_credential_offer_from_json",
            ObjectKind::CredentialRequest => "anoncreds_credential_request_from_json",
            ObjectKind::CredentialRequestMetadata => {
                "anoncreds_credential_request_metadata_from_json"
            }
            ObjectKind::Credential => "anoncreds_credential_from_json",
            ObjectKind::PresentationRequest => "anoncreds_presentation_request_from_json",
            ObjectKind::Presentation => "anoncreds_presentation_from_json",
            ObjectKind::RevocationRegistryDefinition => {
                "anoncreds_revocation_registry_definition_from_json"
            }
            ObjectKind::RevocationRegistryDefinitionPrivate => {
                "anoncreds_revocation_registry_definition_private_from_json"
            }
            ObjectKind::RevocationRegistry => "anoncreds_revocation_registry_from_json",
            ObjectKind::RevocationStatusList => "anoncreds_revocation_status_list_from_json",
            ObjectKind::RevocationState => "anoncreds_revocation_state_from_json",
            ObjectKind::W3cCredential => "anoncreds_w3c_credential_from_json",
            ObjectKind::W3cPresentation => "anoncreds_w3c_presentation_from_json",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}
