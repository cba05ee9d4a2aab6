use std::fmt;

use bon::Builder;
use const_oid::ObjectIdentifier;
use der::asn1::{Any, Ia5StringRef, PrintableStringRef, SetOfVec, Utf8StringRef};
use der::{Tag, Tagged};
use x509_cert::attr::AttributeTypeAndValue;
use x509_cert::name::{Name, RdnSequence, RelativeDistinguishedName};

use crate::error::{CsrKitError, Result};

/// The attribute kinds a request subject carries, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Country,
    StateOrProvince,
    Locality,
    Organization,
    OrganizationalUnit,
    CommonName,
    EmailAddress,
}

impl AttributeKind {
    /// Fixed order of the relative distinguished names in every subject.
    pub const ORDER: [AttributeKind; 7] = [
        AttributeKind::Country,
        AttributeKind::StateOrProvince,
        AttributeKind::Locality,
        AttributeKind::Organization,
        AttributeKind::OrganizationalUnit,
        AttributeKind::CommonName,
        AttributeKind::EmailAddress,
    ];

    /// Object identifier of the attribute type.
    pub const fn oid(self) -> ObjectIdentifier {
        match self {
            AttributeKind::Country => ObjectIdentifier::new_unwrap("2.5.4.6"),
            AttributeKind::StateOrProvince => ObjectIdentifier::new_unwrap("2.5.4.8"),
            AttributeKind::Locality => ObjectIdentifier::new_unwrap("2.5.4.7"),
            AttributeKind::Organization => ObjectIdentifier::new_unwrap("2.5.4.10"),
            AttributeKind::OrganizationalUnit => ObjectIdentifier::new_unwrap("2.5.4.11"),
            AttributeKind::CommonName => ObjectIdentifier::new_unwrap("2.5.4.3"),
            // PKCS#9 emailAddress
            AttributeKind::EmailAddress => ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.1"),
        }
    }

    /// Looks up the attribute kind for an object identifier.
    pub fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        Self::ORDER.into_iter().find(|kind| kind.oid() == *oid)
    }

    /// Short name as printed in RFC 4514 strings and by OpenSSL.
    pub const fn short_name(self) -> &'static str {
        match self {
            AttributeKind::Country => "C",
            AttributeKind::StateOrProvince => "ST",
            AttributeKind::Locality => "L",
            AttributeKind::Organization => "O",
            AttributeKind::OrganizationalUnit => "OU",
            AttributeKind::CommonName => "CN",
            AttributeKind::EmailAddress => "emailAddress",
        }
    }

    /// ASN.1 string type used to encode values of this kind.
    pub const fn string_tag(self) -> Tag {
        match self {
            AttributeKind::Country => Tag::PrintableString,
            AttributeKind::EmailAddress => Tag::Ia5String,
            _ => Tag::Utf8String,
        }
    }

    fn encode_value(self, value: &str) -> Result<Any> {
        let encoding_error = |reason: String| CsrKitError::EncodingError {
            attribute: self,
            reason,
        };

        if value.contains('\0') {
            return Err(encoding_error("value contains a NUL byte".to_string()));
        }

        // Validate against the string type's alphabet before wrapping.
        let checked = match self.string_tag() {
            Tag::PrintableString => PrintableStringRef::new(value).map(|_| ()),
            Tag::Ia5String => Ia5StringRef::new(value).map(|_| ()),
            _ => Utf8StringRef::new(value).map(|_| ()),
        };
        checked.map_err(|e| encoding_error(e.to_string()))?;

        Any::new(self.string_tag(), value.as_bytes().to_vec()).map_err(|e| encoding_error(e.to_string()))
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Identity attributes of the entity requesting a certificate.
///
/// All seven values are mandatory; the builder does not compile until each
/// one is set. Empty strings are accepted and encoded as-is.
///
/// # Example
/// ```
/// use csrkit::request::subject::SubjectAttributes;
///
/// let subject = SubjectAttributes::builder()
///     .country("US")
///     .state("California")
///     .locality("San Francisco")
///     .organization("Example Corp")
///     .organizational_unit("IT")
///     .common_name("example.com")
///     .email("admin@example.com")
///     .build();
/// assert_eq!(subject.to_string(), "C=US,ST=California,L=San Francisco,O=Example Corp,OU=IT,CN=example.com,emailAddress=admin@example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Builder)]
#[builder(on(String, into))]
pub struct SubjectAttributes {
    pub country: String,
    pub state: String,
    pub locality: String,
    pub organization: String,
    pub organizational_unit: String,
    pub common_name: String,
    pub email: String,
}

impl SubjectAttributes {
    /// Returns the value stored for `kind`.
    pub fn get(&self, kind: AttributeKind) -> &str {
        match kind {
            AttributeKind::Country => &self.country,
            AttributeKind::StateOrProvince => &self.state,
            AttributeKind::Locality => &self.locality,
            AttributeKind::Organization => &self.organization,
            AttributeKind::OrganizationalUnit => &self.organizational_unit,
            AttributeKind::CommonName => &self.common_name,
            AttributeKind::EmailAddress => &self.email,
        }
    }

    /// Iterates the attributes in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeKind, &str)> + '_ {
        AttributeKind::ORDER
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }

    /// Converts the attributes to an X.509 name with one RDN per attribute.
    ///
    /// # Errors
    /// [`CsrKitError::EncodingError`] naming the first attribute whose value
    /// does not fit its string type.
    pub fn as_x509_name(&self) -> Result<Name> {
        let rdns = self
            .iter()
            .map(|(kind, value)| {
                let atv = AttributeTypeAndValue {
                    oid: kind.oid(),
                    value: kind.encode_value(value)?,
                };
                let set = SetOfVec::try_from(vec![atv]).map_err(|e| {
                    CsrKitError::EncodingError {
                        attribute: kind,
                        reason: e.to_string(),
                    }
                })?;
                Ok(RelativeDistinguishedName(set))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RdnSequence(rdns))
    }

    /// Recovers the attributes from an X.509 name.
    ///
    /// The name must hold exactly the seven attributes, one per RDN, in
    /// emission order.
    pub fn from_x509_name(name: &Name) -> Result<Self> {
        if name.0.len() != AttributeKind::ORDER.len() {
            return Err(CsrKitError::DecodingError(format!(
                "expected {} subject attributes, found {}",
                AttributeKind::ORDER.len(),
                name.0.len()
            )));
        }

        let mut values = Vec::with_capacity(AttributeKind::ORDER.len());
        for (expected, rdn) in AttributeKind::ORDER.into_iter().zip(name.0.iter()) {
            let mut atvs = rdn.0.iter();
            let (Some(atv), None) = (atvs.next(), atvs.next()) else {
                return Err(CsrKitError::DecodingError(
                    "multi-valued RDNs are not supported".to_string(),
                ));
            };

            match AttributeKind::from_oid(&atv.oid) {
                Some(kind) if kind == expected => {}
                _ => {
                    return Err(CsrKitError::DecodingError(format!(
                        "expected {expected} attribute, found {}",
                        atv.oid
                    )));
                }
            }

            match atv.value.tag() {
                Tag::PrintableString | Tag::Ia5String | Tag::Utf8String => {}
                other => {
                    return Err(CsrKitError::DecodingError(format!(
                        "unsupported string type {other} for {expected}"
                    )));
                }
            }
            let value = std::str::from_utf8(atv.value.value())
                .map_err(|e| CsrKitError::DecodingError(e.to_string()))?;
            values.push(value.to_string());
        }

        let mut values = values.into_iter();
        let mut next = || values.next().unwrap_or_default();
        Ok(SubjectAttributes {
            country: next(),
            state: next(),
            locality: next(),
            organization: next(),
            organizational_unit: next(),
            common_name: next(),
            email: next(),
        })
    }
}

/// Prints `C=..,ST=..,...,emailAddress=..` in emission order (the order
/// OpenSSL's one-line form uses, not the reversed RFC 4514 order). Values are
/// escaped as in RFC 4514 section 2.4.
impl fmt::Display for SubjectAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (kind, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{kind}=")?;
            write_escaped(f, value)?;
        }
        Ok(())
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    let last = value.chars().count().saturating_sub(1);
    for (i, c) in value.chars().enumerate() {
        let needs_escape = matches!(c, ',' | '+' | '=' | '"' | '\\' | '<' | '>' | ';')
            || (i == 0 && matches!(c, '#' | ' '))
            || (i == last && c == ' ');
        if needs_escape {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    Ok(())
}
