//! Bundled sample contracts for demos

use serde::Serialize;

/// A bundled sample contract
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleContract {
    /// Stable identifier used in URLs
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Contract type hint passed to the analyzer
    #[serde(rename = "type")]
    pub contract_type: &'static str,
    /// Full contract text
    pub text: &'static str,
}

/// Listing entry without the contract body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSummary {
    /// Stable identifier used in URLs
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Contract type hint
    #[serde(rename = "type")]
    pub contract_type: &'static str,
}

impl SampleContract {
    /// Listing entry for this sample
    pub fn summary(&self) -> SampleSummary {
        SampleSummary {
            id: self.id,
            name: self.name,
            description: self.description,
            contract_type: self.contract_type,
        }
    }
}

/// All bundled samples, in display order
pub fn samples() -> &'static [SampleContract] {
    &SAMPLES
}

/// Look a sample up by id
pub fn find_sample(id: &str) -> Option<&'static SampleContract> {
    SAMPLES.iter().find(|s| s.id == id)
}

static SAMPLES: [SampleContract; 3] = [
    SampleContract {
        id: "rental-bad",
        name: "Problematic Rental Agreement",
        description: "A rental contract with multiple red flags",
        contract_type: "rental",
        text: RENTAL_BAD,
    },
    SampleContract {
        id: "employment-medium",
        name: "Employment Contract with Concerns",
        description: "An employment agreement with some concerning clauses",
        contract_type: "employment",
        text: EMPLOYMENT_MEDIUM,
    },
    SampleContract {
        id: "nda-good",
        name: "Fair Non-Disclosure Agreement",
        description: "A balanced NDA with standard protections",
        contract_type: "nda",
        text: NDA_GOOD,
    },
];

const RENTAL_BAD: &str = "RESIDENTIAL LEASE AGREEMENT

This Lease Agreement is entered into between Parkview Property Holdings LLC (\"Landlord\") and the undersigned resident (\"Tenant\") for the unit at 412 Elm Street, Apartment 3B.

1. TERM. The lease begins on the first day of the month following signature and runs for twelve (12) months. This lease shall automatically renew for successive twelve (12) month terms unless Tenant delivers written notice of non-renewal by certified mail no later than one hundred twenty (120) days before the end of the current term.

2. RENT. Monthly rent is $1,850, due on the 1st of each month. Landlord may increase rent at any time during the term upon fifteen (15) days notice, in any amount Landlord determines.

3. LATE FEES. Rent received after 11:59 PM on the 1st is late. A late fee of $150 will be charged for each late payment, plus $25 for every additional day rent remains unpaid.

4. SECURITY DEPOSIT. Tenant shall pay a security deposit of $2,000. The security deposit is non-refundable and will be retained by Landlord at the end of the tenancy regardless of the condition of the unit.

5. ENTRY. Landlord and its agents may enter the unit at any time, with or without notice, for any purpose Landlord deems appropriate.

6. PETS. No pets of any kind are permitted on the premises, including fish and caged animals. Discovery of any animal will result in a $500 fine and immediate termination of this lease.

7. MAINTENANCE. Tenant is responsible for all repairs to the unit, including plumbing, electrical, heating and appliances, regardless of cause. Tenant shall also pay a monthly building maintenance fee as determined by Landlord.

8. TERMINATION. Landlord may terminate this lease for any reason with thirty (30) days notice. Tenant may not terminate this lease early. If Tenant vacates before the end of the term, Tenant owes all remaining rent for the term plus a penalty equal to three (3) months rent.

9. DISPUTES. Any dispute arising out of this lease shall be resolved exclusively by binding arbitration administered by an arbitrator selected by Landlord. Tenant waives any right to a jury trial and any right to participate in a class action.

10. LIABILITY. Tenant releases Landlord from all liability for injury or property damage occurring on the premises, including damage caused by Landlord's own negligence.

11. CHANGES. Landlord may modify any term of this lease at any time by posting notice in the building lobby. Continued occupancy constitutes acceptance.

Tenant acknowledges having read and understood this agreement.";

const EMPLOYMENT_MEDIUM: &str = "EMPLOYMENT AGREEMENT

This Employment Agreement is made between Brightline Analytics Inc. (\"Company\") and the undersigned employee (\"Employee\").

1. POSITION. Employee is hired as a Senior Data Analyst reporting to the Director of Analytics. Duties may be changed by the Company as business needs require.

2. COMPENSATION. Employee will receive an annual base salary of $92,000, paid bi-weekly. Employee is eligible for a discretionary annual bonus; the amount, if any, is determined solely by the Company.

3. BENEFITS. Employee may participate in the Company's health, dental and 401(k) plans on the same terms as other employees. Employee receives fifteen (15) days of paid time off per year.

4. AT-WILL EMPLOYMENT. Employment is at-will. Either party may end the employment at any time, with or without cause. The Company requests two (2) weeks notice of resignation.

5. INTELLECTUAL PROPERTY. All inventions, works and ideas created by Employee during the term of employment, whether or not related to the Company's business and whether or not created on Company time or equipment, belong exclusively to the Company.

6. NON-COMPETE. For eighteen (18) months after employment ends, Employee shall not work for or provide services to any business that competes with the Company anywhere in North America.

7. NON-SOLICITATION. For twelve (12) months after employment ends, Employee shall not solicit Company clients or employees.

8. CONFIDENTIALITY. Employee shall keep confidential all non-public information about the Company, its clients and its business during and after employment.

9. TRAINING REPAYMENT. If Employee resigns within two (2) years of the start date, Employee shall repay the full cost of any training or certification paid for by the Company.

10. DISPUTES. Disputes under this Agreement shall be resolved by arbitration in the Company's home county. Each party bears its own attorney fees.

11. ENTIRE AGREEMENT. This Agreement is the entire agreement between the parties and may be amended only in writing signed by both parties.";

const NDA_GOOD: &str = "MUTUAL NON-DISCLOSURE AGREEMENT

This Mutual Non-Disclosure Agreement is entered into by Harbor Labs LLC and Northwind Design Studio (each a \"Party\") to protect confidential information exchanged while evaluating a potential business relationship.

1. CONFIDENTIAL INFORMATION. Confidential Information means non-public business, technical or financial information disclosed by one Party to the other and marked or reasonably understood to be confidential.

2. EXCLUSIONS. Confidential Information does not include information that (a) is or becomes public through no fault of the receiving Party, (b) was known to the receiving Party before disclosure, (c) is independently developed without use of the disclosed information, or (d) is rightfully received from a third party without a duty of confidentiality.

3. OBLIGATIONS. Each Party shall use the other's Confidential Information only to evaluate the potential relationship and shall protect it with at least the care it uses for its own confidential information, and no less than reasonable care.

4. REQUIRED DISCLOSURE. A Party may disclose Confidential Information when required by law, provided it gives the other Party prompt notice where legally permitted so that Party may seek a protective order.

5. TERM. This Agreement lasts two (2) years from the date of signature. Confidentiality obligations survive for three (3) years after the Agreement ends.

6. RETURN OF MATERIALS. On written request, each Party shall return or destroy the other's Confidential Information within thirty (30) days and confirm in writing that it has done so.

7. NO LICENSE. Nothing in this Agreement grants any license or ownership right in the other Party's Confidential Information.

8. TERMINATION. Either Party may terminate this Agreement with thirty (30) days written notice. Obligations regarding information already disclosed continue as stated in Section 5.

9. GOVERNING LAW. This Agreement is governed by the laws of the State of Oregon. Either Party may seek relief in the state or federal courts located in Multnomah County.

10. ENTIRE AGREEMENT. This Agreement is the entire agreement between the Parties on this subject and may be amended only in writing signed by both Parties.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_long_enough_to_analyze() {
        for sample in samples() {
            assert!(sample.text.trim().chars().count() >= 100, "{} too short", sample.id);
        }
    }

    #[test]
    fn test_find_sample() {
        assert_eq!(find_sample("nda-good").unwrap().contract_type, "nda");
        assert!(find_sample("missing").is_none());
    }

    #[test]
    fn test_rental_sample_has_the_known_problems() {
        let text = find_sample("rental-bad").unwrap().text;
        assert!(text.contains("automatically renew"));
        assert!(text.contains("$150"));
        assert!(text.contains("No pets"));
        assert!(text.contains("arbitration"));
    }

    #[test]
    fn test_summary_serializes_type_field() {
        let json = serde_json::to_value(find_sample("rental-bad").unwrap().summary()).unwrap();
        assert_eq!(json["type"], "rental");
        assert!(json.get("text").is_none());
    }
}
