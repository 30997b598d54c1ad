//! Host-facing operation catalog.

use std::fmt;
use std::str::FromStr;

use anoncreds_bridge_native::NativeLibrary;
use anoncreds_bridge_types::ObjectKind;
use serde_json::{Map, Value};

use crate::args::{ArgumentBag, Param, ParamKind};
use crate::bridge::Bridge;
use crate::error::{BridgeError, BridgeResult};
use crate::release::CallScope;
use crate::translate::Outcome;

const fn req(name: &'static str, kind: ParamKind) -> Param {
    Param::required(name, kind)
}

const fn opt(name: &'static str, kind: ParamKind) -> Param {
    Param::optional(name, kind)
}

// ─── Parameter tables ───────────────────────────────────────────────────────

const NONE: &[Param] = &[];
const OBJECT: &[Param] = &[req("objectHandle", ParamKind::Handle)];
const OBJECT_ATTRIBUTE: &[Param] = &[
    req("objectHandle", ParamKind::Handle),
    req("name", ParamKind::String),
];
const FROM_JSON: &[Param] = &[req("json", ParamKind::Json)];

const CREATE_SCHEMA: &[Param] = &[
    req("name", ParamKind::String),
    req("version", ParamKind::String),
    req("issuerId", ParamKind::String),
    req("attributeNames", ParamKind::StringList),
];

const CREATE_CREDENTIAL_DEFINITION: &[Param] = &[
    req("schemaId", ParamKind::String),
    req("schema", ParamKind::Handle),
    req("tag", ParamKind::String),
    req("issuerId", ParamKind::String),
    req("signatureType", ParamKind::String),
    req("supportRevocation", ParamKind::Flag),
];

const CREATE_CREDENTIAL_OFFER: &[Param] = &[
    req("schemaId", ParamKind::String),
    req("credentialDefinitionId", ParamKind::String),
    req("keyCorrectnessProof", ParamKind::Handle),
];

const CREATE_CREDENTIAL_REQUEST: &[Param] = &[
    opt("entropy", ParamKind::String),
    opt("proverDid", ParamKind::String),
    req("credentialDefinition", ParamKind::Handle),
    req("linkSecret", ParamKind::String),
    req("linkSecretId", ParamKind::String),
    req("credentialOffer", ParamKind::Handle),
];

const CREATE_CREDENTIAL: &[Param] = &[
    req("credentialDefinition", ParamKind::Handle),
    req("credentialDefinitionPrivate", ParamKind::Handle),
    req("credentialOffer", ParamKind::Handle),
    req("credentialRequest", ParamKind::Handle),
    req("attributeNames", ParamKind::StringList),
    req("attributeRawValues", ParamKind::StringList),
    opt("attributeEncodedValues", ParamKind::StringList),
    opt("revocationConfiguration", ParamKind::RevocationConfig),
];

const PROCESS_CREDENTIAL: &[Param] = &[
    req("credential", ParamKind::Handle),
    req("credentialRequestMetadata", ParamKind::Handle),
    req("linkSecret", ParamKind::String),
    req("credentialDefinition", ParamKind::Handle),
    opt("revocationRegistryDefinition", ParamKind::Handle),
];

const ENCODE_CREDENTIAL_ATTRIBUTES: &[Param] = &[req("attributeRawValues", ParamKind::StringList)];

const CREATE_PRESENTATION: &[Param] = &[
    req("presentationRequest", ParamKind::Handle),
    req("credentials", ParamKind::CredentialEntries),
    req("credentialsProve", ParamKind::CredentialProves),
    req("selfAttestNames", ParamKind::StringList),
    req("selfAttestValues", ParamKind::StringList),
    req("linkSecret", ParamKind::String),
    req("schemas", ParamKind::HandleList),
    req("schemaIds", ParamKind::StringList),
    req("credentialDefinitions", ParamKind::HandleList),
    req("credentialDefinitionIds", ParamKind::StringList),
];

const VERIFY_PRESENTATION: &[Param] = &[
    req("presentation", ParamKind::Handle),
    req("presentationRequest", ParamKind::Handle),
    req("schemas", ParamKind::HandleList),
    req("schemaIds", ParamKind::StringList),
    req("credentialDefinitions", ParamKind::HandleList),
    req("credentialDefinitionIds", ParamKind::StringList),
    opt("revocationRegistryDefinitions", ParamKind::HandleList),
    opt("revocationRegistryDefinitionIds", ParamKind::StringList),
    opt("revocationStatusLists", ParamKind::HandleList),
    opt(
        "nonRevokedIntervalOverrides",
        ParamKind::NonRevokedOverrides,
    ),
];

const CREATE_REVOCATION_REGISTRY_DEFINITION: &[Param] = &[
    req("credentialDefinition", ParamKind::Handle),
    req("credentialDefinitionId", ParamKind::String),
    req("issuerId", ParamKind::String),
    req("tag", ParamKind::String),
    req("revocationRegistryType", ParamKind::String),
    req("maximumCredentialNumber", ParamKind::I64),
    opt("tailsDirectoryPath", ParamKind::String),
];

const CREATE_REVOCATION_STATUS_LIST: &[Param] = &[
    req("credentialDefinition", ParamKind::Handle),
    req("revocationRegistryDefinitionId", ParamKind::String),
    req("revocationRegistryDefinition", ParamKind::Handle),
    req("revocationRegistryDefinitionPrivate", ParamKind::Handle),
    req("issuerId", ParamKind::String),
    req("issuanceByDefault", ParamKind::Flag),
    opt("timestamp", ParamKind::I64),
];

const UPDATE_REVOCATION_STATUS_LIST: &[Param] = &[
    req("credentialDefinition", ParamKind::Handle),
    req("revocationRegistryDefinition", ParamKind::Handle),
    req("revocationRegistryDefinitionPrivate", ParamKind::Handle),
    req("revocationStatusList", ParamKind::Handle),
    opt("issued", ParamKind::I32List),
    opt("revoked", ParamKind::I32List),
    opt("timestamp", ParamKind::I64),
];

const UPDATE_REVOCATION_STATUS_LIST_TIMESTAMP_ONLY: &[Param] = &[
    req("timestamp", ParamKind::I64),
    req("revocationStatusList", ParamKind::Handle),
];

const CREATE_OR_UPDATE_REVOCATION_STATE: &[Param] = &[
    req("revocationRegistryDefinition", ParamKind::Handle),
    req("revocationStatusList", ParamKind::Handle),
    req("revocationRegistryIndex", ParamKind::I64),
    req("tailsPath", ParamKind::String),
    opt("oldRevocationState", ParamKind::Handle),
    opt("oldRevocationStatusList", ParamKind::Handle),
];

const CREATE_W3C_CREDENTIAL: &[Param] = &[
    req("credentialDefinition", ParamKind::Handle),
    req("credentialDefinitionPrivate", ParamKind::Handle),
    req("credentialOffer", ParamKind::Handle),
    req("credentialRequest", ParamKind::Handle),
    req("attributeNames", ParamKind::StringList),
    req("attributeRawValues", ParamKind::StringList),
    opt("revocationConfiguration", ParamKind::RevocationConfig),
    opt("w3cVersion", ParamKind::String),
];

const CREATE_W3C_PRESENTATION: &[Param] = &[
    req("presentationRequest", ParamKind::Handle),
    req("credentials", ParamKind::CredentialEntries),
    req("credentialsProve", ParamKind::CredentialProves),
    req("linkSecret", ParamKind::String),
    req("schemas", ParamKind::HandleList),
    req("schemaIds", ParamKind::StringList),
    req("credentialDefinitions", ParamKind::HandleList),
    req("credentialDefinitionIds", ParamKind::StringList),
    opt("w3cVersion", ParamKind::String),
];

const CREDENTIAL_TO_W3C: &[Param] = &[
    req("objectHandle", ParamKind::Handle),
    req("issuerId", ParamKind::String),
    opt("w3cVersion", ParamKind::String),
];

// ─── Operations ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Version,
    GetCurrentError,
    SetDefaultLogger,
    GetJson,
    GetTypeName,
    ObjectFree,
    CreateLinkSecret,
    GenerateNonce,
    CreateSchema,
    CreateCredentialDefinition,
    CreateCredentialOffer,
    CreateCredentialRequest,
    CreateCredential,
    ProcessCredential,
    CredentialGetAttribute,
    EncodeCredentialAttributes,
    CreatePresentation,
    VerifyPresentation,
    CreateRevocationRegistryDefinition,
    RevocationRegistryDefinitionGetAttribute,
    CreateRevocationStatusList,
    UpdateRevocationStatusList,
    UpdateRevocationStatusListTimestampOnly,
    CreateOrUpdateRevocationState,
    CreateW3cCredential,
    ProcessW3cCredential,
    CreateW3cPresentation,
    VerifyW3cPresentation,
    CredentialToW3c,
    CredentialFromW3c,
    W3cCredentialGetIntegrityProofDetails,
    W3cCredentialProofGetAttribute,
    FromJson(ObjectKind),
}

const FIXED: [Operation; 32] = [
    Operation::Version,
    Operation::GetCurrentError,
    Operation::SetDefaultLogger,
    Operation::GetJson,
    Operation::GetTypeName,
    Operation::ObjectFree,
    Operation::CreateLinkSecret,
    Operation::GenerateNonce,
    Operation::CreateSchema,
    Operation::CreateCredentialDefinition,
    Operation::CreateCredentialOffer,
    Operation::CreateCredentialRequest,
    Operation::CreateCredential,
    Operation::ProcessCredential,
    Operation::CredentialGetAttribute,
    Operation::EncodeCredentialAttributes,
    Operation::CreatePresentation,
    Operation::VerifyPresentation,
    Operation::CreateRevocationRegistryDefinition,
    Operation::RevocationRegistryDefinitionGetAttribute,
    Operation::CreateRevocationStatusList,
    Operation::UpdateRevocationStatusList,
    Operation::UpdateRevocationStatusListTimestampOnly,
    Operation::CreateOrUpdateRevocationState,
    Operation::CreateW3cCredential,
    Operation::ProcessW3cCredential,
    Operation::CreateW3cPresentation,
    Operation::VerifyW3cPresentation,
    Operation::CredentialToW3c,
    Operation::CredentialFromW3c,
    Operation::W3cCredentialGetIntegrityProofDetails,
    Operation::W3cCredentialProofGetAttribute,
];

fn from_json_name(kind: ObjectKind) -> &'static str {
    match kind {
        ObjectKind::Schema => "schemaFromJson",
        ObjectKind::CredentialDefinition => "credentialDefinitionFromJson",
        ObjectKind::CredentialDefinitionPrivate => "credentialDefinitionPrivateFromJson",
        ObjectKind::KeyCorrectnessProof => "keyCorrectnessProofFromJson",
        ObjectKind::CredentialOffer => "credentialOfferFromJson",
        ObjectKind::CredentialRequest => "credentialRequestFromJson",
        ObjectKind::CredentialRequestMetadata => "credentialRequestMetadataFromJson",
        ObjectKind::Credential => "credentialFromJson",
        ObjectKind::PresentationRequest => "presentationRequestFromJson",
        ObjectKind::Presentation => "presentationFromJson",
        ObjectKind::RevocationRegistryDefinition => "revocationRegistryDefinitionFromJson",
        ObjectKind::RevocationRegistryDefinitionPrivate => {
            "revocationRegistryDefinitionPrivateFromJson"
        }
        ObjectKind::RevocationRegistry => "revocationRegistryFromJson",
        ObjectKind::RevocationStatusList => "revocationStatusListFromJson",
        ObjectKind::RevocationState => "revocationStateFromJson",
        ObjectKind::W3cCredential => "w3cCredentialFromJson",
        ObjectKind::W3cPresentation => "w3cPresentationFromJson",
    }
}

impl Operation {
    /// Every operation, fixed entry points first, then one from-JSON
    /// constructor per object kind.
    pub fn all() -> impl Iterator<Item = Operation> {
        FIXED
            .into_iter()
            .chain(ObjectKind::ALL.into_iter().map(Operation::FromJson))
    }

    pub fn host_name(self) -> &'static str {
        match self {
            Operation::Version => "version",
            Operation::GetCurrentError => "getCurrentError",
            Operation::SetDefaultLogger => "setDefaultLogger",
            Operation::GetJson => "getJson",
            Operation::GetTypeName => "getTypeName",
            Operation::ObjectFree => "objectFree",
            Operation::CreateLinkSecret => "createLinkSecret",
            Operation::GenerateNonce => "generateNonce",
            Operation::CreateSchema => "createSchema",
            Operation::CreateCredentialDefinition => "createCredentialDefinition",
            Operation::CreateCredentialOffer => "createCredentialOffer",
            Operation::CreateCredentialRequest => "createCredentialRequest",
            Operation::CreateCredential => "createCredential",
            Operation::ProcessCredential => "processCredential",
            Operation::CredentialGetAttribute => "credentialGetAttribute",
            Operation::EncodeCredentialAttributes => "encodeCredentialAttributes",
            Operation::CreatePresentation => "createPresentation",
            Operation::VerifyPresentation => "verifyPresentation",
            Operation::CreateRevocationRegistryDefinition => "createRevocationRegistryDefinition",
            Operation::RevocationRegistryDefinitionGetAttribute => {
                "revocationRegistryDefinitionGetAttribute"
            }
            Operation::CreateRevocationStatusList => "createRevocationStatusList",
            Operation::UpdateRevocationStatusList => "updateRevocationStatusList",
            Operation::UpdateRevocationStatusListTimestampOnly => {
                "updateRevocationStatusListTimestampOnly"
            }
            Operation::CreateOrUpdateRevocationState => "createOrUpdateRevocationState",
            Operation::CreateW3cCredential => "createW3cCredential",
            Operation::ProcessW3cCredential => "processW3cCredential",
            Operation::CreateW3cPresentation => "createW3cPresentation",
            Operation::VerifyW3cPresentation => "verifyW3cPresentation",
            Operation::CredentialToW3c => "credentialToW3c",
            Operation::CredentialFromW3c => "credentialFromW3c",
            Operation::W3cCredentialGetIntegrityProofDetails => {
                "w3cCredentialGetIntegrityProofDetails"
            }
            Operation::W3cCredentialProofGetAttribute => "w3cCredentialProofGetAttribute",
            Operation::FromJson(kind) => from_json_name(kind),
        }
    }

    pub fn params(self) -> &'static [Param] {
        match self {
            Operation::Version
            | Operation::GetCurrentError
            | Operation::SetDefaultLogger
            | Operation::CreateLinkSecret
            | Operation::GenerateNonce => NONE,
            Operation::GetJson
            | Operation::GetTypeName
            | Operation::ObjectFree
            | Operation::CredentialFromW3c
            | Operation::W3cCredentialGetIntegrityProofDetails => OBJECT,
            Operation::CredentialGetAttribute
            | Operation::RevocationRegistryDefinitionGetAttribute
            | Operation::W3cCredentialProofGetAttribute => OBJECT_ATTRIBUTE,
            Operation::CreateSchema => CREATE_SCHEMA,
            Operation::CreateCredentialDefinition => CREATE_CREDENTIAL_DEFINITION,
            Operation::CreateCredentialOffer => CREATE_CREDENTIAL_OFFER,
            Operation::CreateCredentialRequest => CREATE_CREDENTIAL_REQUEST,
            Operation::CreateCredential => CREATE_CREDENTIAL,
            Operation::ProcessCredential | Operation::ProcessW3cCredential => PROCESS_CREDENTIAL,
            Operation::EncodeCredentialAttributes => ENCODE_CREDENTIAL_ATTRIBUTES,
            Operation::CreatePresentation => CREATE_PRESENTATION,
            Operation::VerifyPresentation | Operation::VerifyW3cPresentation => {
                VERIFY_PRESENTATION
            }
            Operation::CreateRevocationRegistryDefinition => CREATE_REVOCATION_REGISTRY_DEFINITION,
            Operation::CreateRevocationStatusList => CREATE_REVOCATION_STATUS_LIST,
            Operation::UpdateRevocationStatusList => UPDATE_REVOCATION_STATUS_LIST,
            Operation::UpdateRevocationStatusListTimestampOnly => {
                UPDATE_REVOCATION_STATUS_LIST_TIMESTAMP_ONLY
            }
            Operation::CreateOrUpdateRevocationState => CREATE_OR_UPDATE_REVOCATION_STATE,
            Operation::CreateW3cCredential => CREATE_W3C_CREDENTIAL,
            Operation::CreateW3cPresentation => CREATE_W3C_PRESENTATION,
            Operation::CredentialToW3c => CREDENTIAL_TO_W3C,
            Operation::FromJson(_) => FROM_JSON,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_name())
    }
}

impl FromStr for Operation {
    type Err = BridgeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Operation::all()
            .find(|op| op.host_name() == name)
            .ok_or_else(|| BridgeError::invalid("operation", format!("unknown operation `{name}`")))
    }
}

// ─── Dispatch ───────────────────────────────────────────────────────────────

fn to_json<T: serde::Serialize>(value: T) -> BridgeResult<Value> {
    Ok(serde_json::to_value(value)?)
}

impl<L: NativeLibrary> Bridge<L> {
    /// Run one operation against a host argument bag.
    pub fn invoke(&self, operation: Operation, args: &Map<String, Value>) -> Outcome {
        Outcome::from_result(self.dispatch(operation, &ArgumentBag::new(args)))
    }

    /// [`Bridge::invoke`] keyed by host name, with the arguments as any
    /// host value.
    pub fn invoke_named(&self, name: &str, args: &Value) -> Outcome {
        let result = name.parse::<Operation>().and_then(|operation| {
            let bag = match args {
                Value::Null => None,
                other => Some(ArgumentBag::from_value(other)?),
            };
            let empty = Map::new();
            let bag = bag.unwrap_or_else(|| ArgumentBag::new(&empty));
            self.dispatch(operation, &bag)
        });
        Outcome::from_result(result)
    }

    fn dispatch(&self, operation: Operation, args: &ArgumentBag<'_>) -> BridgeResult<Value> {
        let _scope = CallScope::enter(operation.host_name());
        log::debug!("invoking {operation}");
        args.validate(operation.host_name(), operation.params())?;

        match operation {
            Operation::Version => to_json(self.version()?),
            Operation::GetCurrentError => to_json(self.get_current_error()?),
            Operation::SetDefaultLogger => to_json(self.set_default_logger()?),
            Operation::GetJson => to_json(self.get_json(args)?),
            Operation::GetTypeName => to_json(self.get_type_name(args)?),
            Operation::ObjectFree => to_json(self.object_free(args)?),
            Operation::CreateLinkSecret => to_json(self.create_link_secret()?),
            Operation::GenerateNonce => to_json(self.generate_nonce()?),
            Operation::CreateSchema => to_json(self.create_schema(args)?),
            Operation::CreateCredentialDefinition => {
                to_json(self.create_credential_definition(args)?)
            }
            Operation::CreateCredentialOffer => to_json(self.create_credential_offer(args)?),
            Operation::CreateCredentialRequest => to_json(self.create_credential_request(args)?),
            Operation::CreateCredential => to_json(self.create_credential(args)?),
            Operation::ProcessCredential => to_json(self.process_credential(args)?),
            Operation::CredentialGetAttribute => to_json(self.credential_get_attribute(args)?),
            Operation::EncodeCredentialAttributes => {
                to_json(self.encode_credential_attributes(args)?)
            }
            Operation::CreatePresentation => to_json(self.create_presentation(args)?),
            Operation::VerifyPresentation => to_json(self.verify_presentation(args)?),
            Operation::CreateRevocationRegistryDefinition => {
                to_json(self.create_revocation_registry_definition(args)?)
            }
            Operation::RevocationRegistryDefinitionGetAttribute => {
                to_json(self.revocation_registry_definition_get_attribute(args)?)
            }
            Operation::CreateRevocationStatusList => {
                to_json(self.create_revocation_status_list(args)?)
            }
            Operation::UpdateRevocationStatusList => {
                to_json(self.update_revocation_status_list(args)?)
            }
            Operation::UpdateRevocationStatusListTimestampOnly => {
                to_json(self.update_revocation_status_list_timestamp_only(args)?)
            }
            Operation::CreateOrUpdateRevocationState => {
                to_json(self.create_or_update_revocation_state(args)?)
            }
            Operation::CreateW3cCredential => to_json(self.create_w3c_credential(args)?),
            Operation::ProcessW3cCredential => to_json(self.process_w3c_credential(args)?),
            Operation::CreateW3cPresentation => to_json(self.create_w3c_presentation(args)?),
            Operation::VerifyW3cPresentation => to_json(self.verify_w3c_presentation(args)?),
            Operation::CredentialToW3c => to_json(self.credential_to_w3c(args)?),
            Operation::CredentialFromW3c => to_json(self.credential_from_w3c(args)?),
            Operation::W3cCredentialGetIntegrityProofDetails => {
                to_json(self.w3c_credential_get_integrity_proof_details(args)?)
            }
            Operation::W3cCredentialProofGetAttribute => {
                to_json(self.w3c_credential_proof_get_attribute(args)?)
            }
            Operation::FromJson(kind) => to_json(self.from_json(kind, args)?),
        }
    }
}
