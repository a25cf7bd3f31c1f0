//! Family group sheet: the family, both partners, the ordered children with
//! their vitals, and the family's events in one response.

use serde::Serialize;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::enums::ChildRelationship;
use genea_core::types::{Family, LifeEvent, Person};
use genea_db::repo::{FamilyChildRepo, FamilyRepo, LifeEventRepo, PersonRepo};
use genea_db::sea_orm::DatabaseConnection;

#[derive(Debug, Clone, Serialize)]
pub struct GroupSheetChild {
    pub person: Option<Person>,
    pub relationship: ChildRelationship,
    pub sequence: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupSheet {
    pub family: Family,
    pub partner1: Option<Person>,
    pub partner2: Option<Person>,
    pub children: Vec<GroupSheetChild>,
    pub events: Vec<LifeEvent>,
}

pub struct GroupSheetQuery;

impl GroupSheetQuery {
    pub async fn group_sheet(
        db: &DatabaseConnection,
        family_id: Uuid,
    ) -> Result<Option<GroupSheet>, GeneaError> {
        let Some(family) = FamilyRepo::get(db, family_id).await? else {
            return Ok(None);
        };

        let partner1 = match family.partner1_id {
            Some(id) => PersonRepo::get(db, id).await?,
            None => None,
        };
        let partner2 = match family.partner2_id {
            Some(id) => PersonRepo::get(db, id).await?,
            None => None,
        };

        let mut children = Vec::new();
        for membership in FamilyChildRepo::children_of(db, family_id).await? {
            children.push(GroupSheetChild {
                person: PersonRepo::get(db, membership.child_id).await?,
                relationship: membership.relationship,
                sequence: membership.sequence,
            });
        }

        let events = LifeEventRepo::for_owner(db, family_id).await?;

        Ok(Some(GroupSheet {
            family,
            partner1,
            partner2,
            children,
            events,
        }))
    }
}
